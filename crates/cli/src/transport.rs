//! JSON shapes exchanged with callers, plus layout parsing for flags.

use anyhow::{bail, Context, Result};
use cubeindex::api::{CubeState, FACELETS};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A cube and the moves to apply (or search from).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeRequest {
    pub cube_layout: Vec<u8>,
    #[serde(default)]
    pub transformation: String,
}

impl CubeRequest {
    /// Validated state after `transformation`.
    pub fn state(&self) -> Result<CubeState> {
        let state = CubeState::from_facelets(&self.cube_layout)?;
        Ok(state.after(&self.transformation)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeLayout {
    pub cube_layout: Vec<u8>,
}

impl From<&CubeState> for CubeLayout {
    fn from(state: &CubeState) -> Self {
        Self {
            cube_layout: state.facelets().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeSolution {
    pub success: bool,
    pub transform: String,
}

impl From<Option<String>> for CubeSolution {
    fn from(found: Option<String>) -> Self {
        match found {
            Some(transform) => Self {
                success: true,
                transform,
            },
            None => Self {
                success: false,
                transform: String::new(),
            },
        }
    }
}

/// `solved`, or 54 comma-separated colour codes.
pub fn parse_layout(text: &str) -> Result<CubeState> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("solved") {
        return Ok(CubeState::solved());
    }
    let colours = text
        .split(',')
        .map(|cell| {
            cell.trim()
                .parse::<u8>()
                .with_context(|| format!("bad colour code {cell:?}"))
        })
        .collect::<Result<Vec<u8>>>()?;
    if colours.len() != FACELETS {
        bail!("expected {FACELETS} colour codes, got {}", colours.len());
    }
    Ok(CubeState::from_facelets(&colours)?)
}

/// Read a `CubeRequest` from a file, or from stdin when `path` is `-`.
pub fn read_request(path: &str) -> Result<CubeRequest> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing request {path}"))
}
