//! Core errors. Only configuration checks produce these; the math itself is total.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid clip planes: near={near}, far={far} (need 0 < near < far)")]
    InvalidClipPlanes { near: f32, far: f32 },
    #[error("Invalid field of view: {0} rad (need 0 < fov < pi)")]
    InvalidFov(f32),
    #[error("Invalid orthographic view height: {0}")]
    InvalidViewHeight(f32),
}

pub type CoreResult<T> = Result<T, CoreError>;
