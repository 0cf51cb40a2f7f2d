use crate::forward::{build_forward_chain, ForwardHop};

/// Shape 5: a forward chain whose final hop's `next` is a raw wasm-hook
/// memo (shape 2, 3 or 4, already serialized). The outermost receiver is
/// the hook contract on the broker; intermediate receivers are the
/// sender's address re-encoded per hop (C4); `inner_json` supplies the
/// innermost receiver itself.
pub fn build_forward_swap(hops: &[ForwardHop], inner_json: &str) -> String {
    let inner: serde_json::Value =
        serde_json::from_str(inner_json).expect("inner memo must be valid JSON");
    build_forward_chain(hops, Some(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::{build_swap, MinAsset, SwapOperation, SwapParams};

    #[test]
    fn wraps_swap_shape_inside_outermost_forward_next() {
        let hops = vec![ForwardHop {
            channel: "channel-141".to_string(),
            port: "transfer".to_string(),
            receiver: "osmo1hook".to_string(),
            timeout_ns: 600_000_000_000,
        }];

        let swap_params = SwapParams {
            hook_contract: "osmo1hook".to_string(),
            venue: "osmosis-poolmanager".to_string(),
            operations: vec![SwapOperation {
                pool: "1".to_string(),
                denom_in: "uatom".to_string(),
                denom_out: "uosmo".to_string(),
            }],
            min_asset: MinAsset {
                denom: "uosmo".to_string(),
                amount: "990000".to_string(),
            },
            timeout_ns: 600_000_000_000,
        };
        let inner = build_swap(&swap_params, "osmo1receiver");

        let memo = build_forward_swap(&hops, &inner);
        let value: serde_json::Value = serde_json::from_str(&memo).unwrap();
        assert_eq!(value["forward"]["channel"], "channel-141");
        assert_eq!(
            value["forward"]["next"]["wasm"]["contract"],
            "osmo1hook"
        );
    }
}
