//! Client controller for the todo API.
//!
//! A headless rendition of the browser front end: it keeps a local mirror
//! of the server collection, validates input before sending it, applies a
//! view filter, and renders the view as HTML.
//!
//! ```no_run
//! use todo_service::client::{HttpTodoApi, TodoController};
//!
//! # async fn run() -> Result<(), todo_service::client::ClientError> {
//! let mut controller = TodoController::new(HttpTodoApi::new("http://localhost:3000")?);
//! controller.load().await?;
//! controller.set_draft("Buy milk");
//! controller.add().await?;
//! println!("{}", controller.render());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod controller;
pub mod input;
pub mod render;
pub mod state;

pub use api::{ClientError, HttpTodoApi, TodoApi};
pub use controller::TodoController;
pub use input::{
    CounterLevel, DANGER_THRESHOLD, InputFeedback, InputLevel, WARNING_THRESHOLD, assess_input,
};
pub use render::{EMPTY_STATE, render};
pub use state::{ClientState, Filter, Notice, NoticeKind, TodoStats, UnknownFilter};
