//! Binary snapshots of tree records.
//!
//! A snapshot is the list of [`SideUpdate`]s a tree holds, encoded with
//! bincode and compressed with zstd. The field layout of [`Update`] is the
//! same one peers exchange, so a snapshot can be replayed into any tree.
//!
//! [`Update`]: crate::tree::Update

use bincode::{Decode, Encode, config};
use snafu::{ResultExt, Snafu, ensure};
use tracing::debug;

use crate::tree::SideUpdate;

const SNAPSHOT_VERSION: u32 = 1;
const COMPRESSION_LEVEL: i32 = 3;

#[derive(Debug, Encode, Decode)]
struct Snapshot {
    version: u32,
    records: Vec<SideUpdate>,
}

pub fn encode_snapshot(records: &[SideUpdate]) -> Result<Vec<u8>, CodecError> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        records: records.to_vec(),
    };
    let encoded = bincode::encode_to_vec(&snapshot, config::standard()).context(EncodeSnafu)?;
    let compressed = zstd::encode_all(encoded.as_slice(), COMPRESSION_LEVEL).context(CompressSnafu)?;
    debug!(
        "Encoded {} records into {} bytes ({} uncompressed)",
        records.len(),
        compressed.len(),
        encoded.len()
    );
    Ok(compressed)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<SideUpdate>, CodecError> {
    let decompressed = zstd::decode_all(bytes).context(DecompressSnafu)?;
    let (snapshot, _): (Snapshot, usize) =
        bincode::decode_from_slice(&decompressed, config::standard()).context(DecodeSnafu)?;
    ensure!(
        snapshot.version == SNAPSHOT_VERSION,
        UnsupportedVersionSnafu {
            version: snapshot.version
        }
    );
    debug!("Decoded {} records from snapshot", snapshot.records.len());
    Ok(snapshot.records)
}

#[derive(Debug, Snafu)]
pub enum CodecError {
    #[snafu(display("Failed to encode snapshot"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Failed to compress snapshot"))]
    CompressError { source: std::io::Error },
    #[snafu(display("Failed to decompress snapshot"))]
    DecompressError { source: std::io::Error },
    #[snafu(display("Failed to decode snapshot"))]
    DecodeError { source: bincode::error::DecodeError },
    #[snafu(display("Unsupported snapshot version {}", version))]
    UnsupportedVersion { version: u32 },
}
