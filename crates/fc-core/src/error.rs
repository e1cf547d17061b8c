use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum FcReason {
    #[error("rule store error")]
    RuleStore,
    #[error("shape catalog error")]
    ShapeCatalog,
    #[error("object decode error")]
    ObjectDecode,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for FcReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::RuleStore => 1101,
            Self::ShapeCatalog => 1102,
            Self::ObjectDecode => 1103,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type FcError = StructError<FcReason>;
pub type FcResult<T> = Result<T, FcError>;
