pub mod edit;
pub mod init;
pub mod persist;
pub mod tree;
pub mod types;
pub mod validate;

pub use edit::{
    add, delete, duplicate, reorder, theme, update, AddArgs, DeleteArgs, DuplicateArgs, ReorderArgs, ThemeArgs,
    UpdateArgs,
};
pub use init::{init, InitArgs};
pub use persist::{publish, save, PersistArgs};
pub use tree::{tree, TreeArgs};
pub use types::{types, TypesArgs};
pub use validate::{validate, ValidateArgs};

use crate::config::{Config, GatewayKind};
use anyhow::Result;
use pagecraft_editor::{DocumentHandle, EditSession, PersistenceGateway};
use pagecraft_gateway::{FileGateway, HttpGateway};
use std::path::PathBuf;

/// Resolve a page file argument against the working directory
pub(crate) fn page_path(cwd: &str, file: &str) -> PathBuf {
    PathBuf::from(cwd).join(file)
}

/// Load a page file into an edit session using the configured catalog
pub(crate) fn open_session(config: &Config, cwd: &str, file: &str) -> Result<EditSession> {
    let handle = DocumentHandle::load(page_path(cwd, file), config.registry()?)?;
    Ok(EditSession::new("cli", handle).with_undo_levels(config.undo_levels))
}

/// Write the session's document back to its file if anything changed
pub(crate) fn commit(session: EditSession) -> Result<bool> {
    if !session.is_dirty() {
        return Ok(false);
    }
    session.into_handle().save_to_disk()?;
    Ok(true)
}

/// Build the configured persistence backend
pub(crate) fn gateway(config: &Config, cwd: &str) -> Result<Box<dyn PersistenceGateway>> {
    let gateway: Box<dyn PersistenceGateway> = match config.gateway {
        GatewayKind::Http => {
            if config.token().is_none() {
                tracing::warn!(env = %config.token_env, "no API token set, sending unauthenticated requests");
            }
            Box::new(HttpGateway::new(config.endpoint.clone(), config.token())?)
        }
        GatewayKind::File => Box::new(FileGateway::new(config.get_out_dir(cwd))),
    };
    Ok(gateway)
}
