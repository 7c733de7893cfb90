//! Adapters from backend errors to the solve taxonomy.

use orienteer_core::SolveError;
use orienteer_core::mip::MipError;

pub(crate) fn construction(what: String) -> impl FnOnce(MipError) -> SolveError {
    move |source| SolveError::ModelConstruction { what, source }
}

pub(crate) fn attribute(attribute: &'static str) -> impl FnOnce(MipError) -> SolveError {
    move |source| SolveError::AttributeRetrieval { attribute, source }
}
