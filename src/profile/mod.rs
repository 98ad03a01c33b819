//! Profile editing: schema, form state, the write client and its lifecycle, and
//! the editor/view that present them. The flow keeps validation local and only
//! hits the network for a dirty, valid snapshot.

pub mod client;
pub mod editor;
pub mod form;
pub mod mutation;
pub mod schema;
pub mod types;
pub mod view;

pub use client::{HttpProfileClient, ProfileApi};
pub use editor::{Notification, NotificationKind, ProfileEditor, ProfileEvents, SaveOutcome};
pub use form::{FormController, FormError, SubmitBlocked};
pub use mutation::{MutationOrchestrator, MutationState};
pub use schema::ValidationErrors;
pub use types::{FieldValue, Preferences, ProfileField, ProfileSaved, ProfileUpdate, UserProfile};
pub use view::ProfileView;
