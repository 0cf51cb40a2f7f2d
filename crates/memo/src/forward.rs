use serde_json::{json, Value};

/// One hop of a PFM forward chain (§4.7 shape 1).
#[derive(Debug, Clone)]
pub struct ForwardHop {
    pub channel: String,
    pub port: String,
    pub receiver: String,
    pub timeout_ns: u64,
}

const FORWARD_RETRIES: u32 = 2;

/// Builds a nested `{"forward": {...}}` memo over `hops`, left-to-right.
/// When `innermost_next` is given, it replaces the last hop's `next` —
/// used by shape 5 to splice a wasm-hook memo at the end of the chain.
pub fn build_forward_chain(hops: &[ForwardHop], innermost_next: Option<Value>) -> String {
    nest(hops, innermost_next).to_string()
}

/// Standalone simple-forward memo (§4.7 shape 1), no trailing wasm hop.
pub fn build_forward(hops: &[ForwardHop]) -> String {
    build_forward_chain(hops, None)
}

fn nest(hops: &[ForwardHop], innermost_next: Option<Value>) -> Value {
    if hops.is_empty() {
        return innermost_next.unwrap_or(Value::Null);
    }

    let hop = &hops[0];
    let mut forward = json!({
        "channel": hop.channel,
        "port": hop.port,
        "receiver": hop.receiver,
        "retries": FORWARD_RETRIES,
        "timeout": hop.timeout_ns,
    });

    let next = if hops.len() > 1 {
        Some(nest(&hops[1..], innermost_next))
    } else {
        innermost_next
    };

    if let Some(next) = next {
        forward["next"] = next;
    }

    json!({ "forward": forward })
}
