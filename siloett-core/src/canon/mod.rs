pub mod citation;
pub mod document;
pub mod episode;
pub mod fact;
pub mod scope;
pub mod subject;

pub use citation::Citation;
pub use document::{
    CanonDocument, DocumentDraft, DocumentId, DocumentKind, DocumentLocator, UniverseId,
};
pub use episode::{EpisodeRef, LineRange};
pub use fact::{CanonFact, FactId, Polarity};
pub use scope::ValidityScope;
