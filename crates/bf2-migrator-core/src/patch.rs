//! Patch applier
//!
//! Works on a private copy of the executable. Every modification is checked
//! against the buffer as mutated so far before it is applied, and the copy is
//! only handed back once the whole plan went through and the length still
//! matches the original.

use memchr::memmem;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::detect::classify;
use crate::error::{Error, Result};
use crate::plan::{Plan, escape_bytes, plan};

/// Result of patching a buffer towards a target backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub from: Backend,
    pub to: Backend,
    pub bytes: Vec<u8>,
}

impl Patched {
    /// Whether the bytes differ from the input
    pub fn is_modified(&self) -> bool {
        self.from != self.to
    }
}

/// Apply every modification of `plan` to a copy of `original`
pub fn apply_plan(original: &[u8], plan: &Plan) -> Result<Vec<u8>> {
    let mut modified = original.to_vec();

    for m in plan {
        let actual = count_occurrences(&modified, &m.old);
        if actual != m.count {
            debug!(
                "Unexpected occurrence count for {} ({}): expected {}, found {}",
                m.field,
                escape_bytes(&m.old),
                m.count,
                actual
            );
            return Err(Error::CountMismatch {
                field: m.field,
                expected: m.count,
                actual,
            });
        }

        modified = replace_all(&modified, &m.old, &m.new);
        debug!(
            "Replaced {} occurrence(s) of {}: {} -> {}",
            actual,
            m.field,
            escape_bytes(&m.old),
            escape_bytes(&m.new)
        );
    }

    // Any change to the length would shift offsets and break the binary
    if modified.len() != original.len() {
        return Err(Error::LengthMismatch {
            expected: original.len(),
            actual: modified.len(),
        });
    }

    Ok(modified)
}

/// Convert a `from` binary into one targeting `to`
///
/// The binary is classified first. A binary that already targets `to` comes
/// back unchanged, and one that does not target `from` is rejected.
pub fn apply(original: &[u8], from: Backend, to: Backend) -> Result<Vec<u8>> {
    let detected = classify(original)?;
    if detected != to && detected != from {
        return Err(Error::SourceMismatch {
            expected: from,
            actual: detected,
        });
    }
    apply_classified(original, detected, to)
}

/// Detect the current backend of `original` and patch it towards `to`
pub fn patch(original: &[u8], to: Backend) -> Result<Patched> {
    let from = classify(original)?;
    info!("Detected backend: {}", from.display_name());

    let bytes = apply_classified(original, from, to)?;
    if from != to {
        info!(
            "Patched binary from {} to {}",
            from.display_name(),
            to.display_name()
        );
    }

    Ok(Patched { from, to, bytes })
}

fn apply_classified(original: &[u8], detected: Backend, to: Backend) -> Result<Vec<u8>> {
    if detected == to {
        info!("Binary already uses {}, nothing to do", to.display_name());
        return Ok(original.to_vec());
    }

    let plan = plan(detected, to)?;
    apply_plan(original, &plan)
}

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }
    memmem::find_iter(haystack, needle).count()
}

fn replace_all(haystack: &[u8], old: &[u8], new: &[u8]) -> Vec<u8> {
    if old.is_empty() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for start in memmem::find_iter(haystack, old) {
        out.extend_from_slice(&haystack[last..start]);
        out.extend_from_slice(new);
        last = start + old.len();
    }
    out.extend_from_slice(&haystack[last..]);
    out
}
