//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render view fragments from plain props or from the page's
//! state signal; backend calls stay in the pages.

pub mod app_header;
pub mod category_tile;
pub mod new_task_form;
pub mod task_row;
pub mod trip_card;
