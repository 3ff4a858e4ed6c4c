//! JSON files read and written by the deployer.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use warp_route::WarpError;
use warp_route::router::DeployedRouterSet;

use crate::error::DeployerError;

/// Reads and parses a JSON file.
///
/// # Errors
///
/// [`DeployerError::Io`] or [`DeployerError::Json`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DeployerError> {
    let content = std::fs::read_to_string(path).map_err(|source| DeployerError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DeployerError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Writes `value` as pretty-printed JSON.
///
/// # Errors
///
/// [`DeployerError::Io`] or [`DeployerError::Json`].
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DeployerError> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| DeployerError::Json {
        path: path.to_owned(),
        source,
    })?;
    content.push('\n');
    std::fs::write(path, content).map_err(|source| DeployerError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Routers of an earlier deployment, or an empty set when `path` is `None`.
///
/// # Errors
///
/// As [`read_json`].
pub fn load_deployment(path: Option<&Path>) -> Result<DeployedRouterSet, DeployerError> {
    path.map_or_else(|| Ok(DeployedRouterSet::new()), read_json)
}

/// Writes the routers of a finished or interrupted deployment to `path`.
///
/// The deployment's own error takes precedence over a failed write, which is
/// only logged in that case.
///
/// # Errors
///
/// The deployment error, else the write error.
pub fn save_deployment(
    path: &Path,
    routers: &DeployedRouterSet,
    outcome: Result<(), WarpError>,
) -> Result<(), DeployerError> {
    let written = write_json(path, routers);
    match &written {
        Ok(()) => {
            tracing::info!(path = %path.display(), routers = routers.len(), "Wrote deployment");
        }
        Err(e) => tracing::error!("Failed to write deployment: {e}"),
    }
    outcome?;
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use warp_route::router::{DeployedRouter, RouterKind};

    #[test]
    fn test_deployment_file_shape() {
        let dir = std::env::temp_dir().join(format!("warp-route-deployer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("deployment.json");

        let routers: DeployedRouterSet = [
            (
                "goerli",
                DeployedRouter {
                    router: address!("0x0000000000000000000000000000000000000001"),
                    kind: RouterKind::HypErc20Collateral,
                },
            ),
            (
                "fuji",
                DeployedRouter {
                    router: address!("0x0000000000000000000000000000000000000002"),
                    kind: RouterKind::HypErc20,
                },
            ),
        ]
        .into_iter()
        .collect();
        write_json(&path, &routers).unwrap();

        let raw: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(raw["goerli"]["kind"], "HypERC20Collateral");
        assert_eq!(
            raw["fuji"]["router"],
            "0x0000000000000000000000000000000000000002"
        );

        let loaded = load_deployment(Some(&path)).unwrap();
        assert_eq!(loaded, routers);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_deployment_error_wins_over_write_error() {
        let path = Path::new("/nonexistent/dir/deployment.json");
        let routers = DeployedRouterSet::new();

        let err = save_deployment(path, &routers, Err(WarpError::NoMetadataFound)).unwrap_err();
        assert!(matches!(err, DeployerError::Warp(WarpError::NoMetadataFound)), "{err}");

        let err = save_deployment(path, &routers, Ok(())).unwrap_err();
        assert!(matches!(err, DeployerError::Io { .. }), "{err}");
    }

    #[test]
    fn test_missing_deployment_is_reported() {
        assert!(load_deployment(None).unwrap().is_empty());
        let err = load_deployment(Some(Path::new("/nonexistent/deployment.json"))).unwrap_err();
        assert!(matches!(err, DeployerError::Io { .. }));
    }
}
