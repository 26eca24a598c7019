//! Request-level errors.
//!
//! Only malformed requests are errors. "Not found", unparseable files and
//! unresolvable imports are ordinary results.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no source files supplied, nothing to analyze")]
    EmptyManifest,

    #[error("target function name must not be empty")]
    EmptyTarget,

    #[error("keyword list is empty after trimming blank entries")]
    EmptyKeywords,
}

pub type EngineResult<T> = Result<T, EngineError>;

pub(crate) fn require_target(target: &str) -> EngineResult<&str> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyTarget);
    }
    Ok(trimmed)
}

pub(crate) fn require_files<T>(files: &[T]) -> EngineResult<()> {
    if files.is_empty() {
        return Err(EngineError::EmptyManifest);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_target_is_rejected() {
        assert_eq!(require_target("   "), Err(EngineError::EmptyTarget));
        assert_eq!(require_target(" run "), Ok("run"));
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let none: [u8; 0] = [];
        assert_eq!(require_files(&none), Err(EngineError::EmptyManifest));
        assert!(require_files(&[1]).is_ok());
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            EngineError::EmptyManifest.to_string(),
            "no source files supplied, nothing to analyze"
        );
    }
}
