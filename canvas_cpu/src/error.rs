// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur when converting external values into renderer types.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The command contains bits that are not known to the renderer.
    #[error("Unsupported command bits {0:#x}")]
    UnsupportedCommand(u32),
    /// The tag does not name a gradient kind.
    #[error("Unsupported gradient tag {0}")]
    UnsupportedGradient(u8),
    /// A texture brush was created from an empty pixel buffer.
    #[error("Texture brushes need at least one pixel")]
    EmptyTexture,
}

/// A specialized `Result` type for the renderer.
pub type Result<T> = core::result::Result<T, Error>;
