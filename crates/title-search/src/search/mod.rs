//! Title search contract: request/response model, validation, submission
//! flow, and results views.

pub mod compliance;
pub mod domain;
pub mod form;
pub mod gateway;
pub mod render;
pub mod risk;
pub mod session;

pub use domain::{
    Deed, Encumbrance, Lien, PropertyAddress, SearchRequest, SearchStatus, SearchType,
    TitleSearchResult,
};
pub use form::{FieldError, FormField, SearchForm, ValidationErrors};
pub use gateway::{
    CredentialStore, EnvCredentialStore, HttpSearchGateway, SearchFailure, SearchGateway,
};
pub use render::{DeedView, EncumbranceView, LienView, RecordSection, ResultsPanel};
pub use session::{SearchSession, SubmissionOutcome};
