use std::path::PathBuf;

/// Ways building a [`crate::BlockTypeRegistry`] can fail. All of them abort registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("block `{block}` needs texture `{texture}` for its {slot} face but it is not loaded")]
    MissingTexture {
        block: String,
        slot: &'static str,
        texture: String,
    },
    #[error("block `{block}` does not name a texture for its {slot} face")]
    UnnamedTexture { block: String, slot: &'static str },
    #[error("block `{block}` has unknown kind `{kind}`")]
    UnknownKind { block: String, kind: String },
    #[error("base texture `{0}` is not loaded")]
    MissingBaseTexture(String),
    #[error("block data {data} for `{block}` does not fit in 4 bits")]
    DataOutOfRange { block: String, data: u8 },
    #[error("texture page `{page}` has unknown pack version `{version}`")]
    UnknownPackVersion { page: String, version: String },
    #[error("invalid block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
