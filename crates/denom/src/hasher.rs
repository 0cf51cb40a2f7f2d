use sha2::{Digest, Sha256};

/// C1 — deterministic IBC-denom hash over a `port/channel/.../base` trace
/// path (§4.1). No normalization of slashes or case inside `trace`; callers
/// build the trace exactly as the IBC protocol would.
pub fn hash_trace(trace: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(trace.as_bytes());
    let digest = hasher.finalize();
    format!("ibc/{}", hex::encode(digest).to_uppercase())
}
