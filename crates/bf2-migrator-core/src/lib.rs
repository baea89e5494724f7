//! # bf2-migrator-core
//!
//! Core library for moving a Battlefield 2 executable between online-service
//! backends (GameSpy, OpenSpy, BF2Hub, PlayBF2).
//!
//! This crate provides:
//! - A static catalog of the supported backends
//! - Backend detection from executable content
//! - Planning of fixed-width byte substitutions between backends
//! - A patch applier that verifies occurrence counts and length before
//!   handing back the patched copy
//! - File helpers that only write fully verified results
//! - Install directory lookup via the Windows registry

pub mod backend;
pub mod detect;
pub mod error;
pub mod field;
pub mod file;
pub mod install;
pub mod patch;
pub mod plan;

#[cfg(test)]
mod fixture;

pub use backend::{Backend, BackendProfile};
pub use detect::{SIGNATURE_LADDER, Signature, classify};
pub use error::{Error, Result};
pub use field::FixedField;
pub use file::{Binary, PatchReport, detect_file, patch_file, read_binary, write_binary};
pub use install::{
    EXECUTABLE_NAME, disable_hub_autopatch, executable_in, find_executable, find_install_dir,
};
pub use patch::{Patched, apply, apply_plan, patch};
pub use plan::{Field, Modification, Plan, escape_bytes, plan};
