//! Error Types
//!
//! This module defines the error types used throughout the pipeline.
//!
//! # Overview
//!
//! The main error type [`CompressError`] covers the per-unit failure modes of
//! a compression pass. None of them abort the pass: every stage degrades to
//! "skip this unit, continue, log" and the orchestrator in
//! [`crate::pipeline`] reports an aggregate result regardless.
//!
//! An empty input tree is not an error; it yields an empty
//! [`crate::pipeline::CompressedScene`] with all-zero stats.

use thiserror::Error;

/// Per-unit failure modes of a compression pass.
///
/// Each variant names the unit that failed so the log line written at the
/// degradation point carries enough context to find the offending asset.
#[derive(Error, Debug)]
pub enum CompressError {
    // ========================================================================
    // Geometry Errors
    // ========================================================================
    /// The geometry carries no position attribute and contributes nothing.
    /// The geometry is dropped; the pass continues.
    #[error("Geometry of mesh '{mesh}' has no position attribute")]
    MissingPositions {
        /// Name of the mesh instance that carried the geometry
        mesh: String,
    },

    /// One material group could not be merged (attribute shape mismatch or
    /// similar). The group is skipped; other groups proceed.
    #[error("Failed to merge geometry group for material '{material}': {reason}")]
    GeometryMergeFailed {
        /// Name of the group's material
        material: String,
        /// What went wrong
        reason: String,
    },

    // ========================================================================
    // Texture Errors
    // ========================================================================
    /// The raster source behind a texture slot is of a kind this pipeline
    /// cannot resample. The texture passes through unmodified.
    #[error("Texture slot '{slot}' has an unsupported raster source: {detail}")]
    UnsupportedTextureSource {
        /// Slot name on the material
        slot: String,
        /// Why the source cannot be processed
        detail: String,
    },

    /// The alpha channel of a resampled image could not be sampled. The
    /// texture is assumed opaque.
    #[error("Cannot sample alpha of texture slot '{slot}'; assuming opaque")]
    AlphaSampleRestricted {
        /// Slot name on the material
        slot: String,
    },

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// Image encoding error.
    #[error("Image encode error: {0}")]
    ImageEncode(String),
}

impl From<image::ImageError> for CompressError {
    fn from(err: image::ImageError) -> Self {
        CompressError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, CompressError>`.
pub type Result<T> = std::result::Result<T, CompressError>;
