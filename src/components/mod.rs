//! UI Components
//!
//! Leptos components for the board.

mod card_list;
mod filter_menu;
mod help_overlay;
mod matrix_grid;
mod quadrant_panel;
mod task_card;
mod task_form;
mod toolbar;
mod unassigned_pool;

pub use card_list::CardList;
pub use filter_menu::FilterMenu;
pub use help_overlay::HelpOverlay;
pub use matrix_grid::MatrixGrid;
pub use quadrant_panel::QuadrantPanel;
pub use task_card::TaskCard;
pub use task_form::TaskForm;
pub use toolbar::{start_clear_completed, start_refresh, Toolbar};
pub use unassigned_pool::UnassignedPool;
