use serde_json::{json, Value};

use crate::forward::{build_forward_chain, ForwardHop};

/// One DEX hop inside the broker's swap route (§4.7 operations list).
#[derive(Debug, Clone)]
pub struct SwapOperation {
    pub pool: String,
    pub denom_in: String,
    pub denom_out: String,
}

#[derive(Debug, Clone)]
pub struct MinAsset {
    pub denom: String,
    pub amount: String,
}

/// `post_swap_action.ibc_transfer.ibc_info` (§4.7 shape 3/4).
#[derive(Debug, Clone)]
pub struct IbcInfo {
    pub source_channel: String,
    pub receiver: String,
    pub memo: Option<String>,
    pub recover_address: String,
}

/// Common swap parameters shared by shapes 2, 3 and 4.
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub hook_contract: String,
    pub venue: String,
    pub operations: Vec<SwapOperation>,
    pub min_asset: MinAsset,
    pub timeout_ns: u64,
}

fn user_swap(params: &SwapParams) -> Value {
    json!({
        "swap_exact_asset_in": {
            "swap_venue_name": params.venue,
            "operations": params.operations.iter().map(|op| json!({
                "pool": op.pool,
                "denom_in": op.denom_in,
                "denom_out": op.denom_out,
            })).collect::<Vec<_>>(),
        }
    })
}

fn swap_and_action(params: &SwapParams, post_swap_action: Value) -> Value {
    json!({
        "wasm": {
            "contract": params.hook_contract,
            "msg": {
                "swap_and_action": {
                    "user_swap": user_swap(params),
                    "min_asset": { "native": { "denom": params.min_asset.denom, "amount": params.min_asset.amount } },
                    "timeout_timestamp": params.timeout_ns,
                    "post_swap_action": post_swap_action,
                    "affiliates": [],
                }
            }
        }
    })
}

/// Shape 2: transfer + swap on the broker, stay on the broker.
pub fn build_swap(params: &SwapParams, to_address: &str) -> String {
    swap_and_action(
        params,
        json!({ "transfer": { "to_address": to_address } }),
    )
    .to_string()
}

/// Shape 3: swap on the broker, single outbound IBC hop.
pub fn build_swap_forward(params: &SwapParams, ibc_info: &IbcInfo) -> String {
    swap_and_action(params, ibc_transfer_action(ibc_info)).to_string()
}

/// Shape 4: swap on the broker, `ibc_info.memo` carries shape 1 describing
/// the remaining hops. `remaining_hops` must be non-empty.
pub fn build_swap_multihop_forward(
    params: &SwapParams,
    recover_address: &str,
    first_hop_source_channel: &str,
    remaining_hops: &[ForwardHop],
) -> String {
    let nested_memo = build_forward_chain(remaining_hops, None);
    let ibc_info = IbcInfo {
        source_channel: first_hop_source_channel.to_string(),
        receiver: remaining_hops
            .first()
            .map(|h| h.receiver.clone())
            .unwrap_or_default(),
        memo: Some(nested_memo),
        recover_address: recover_address.to_string(),
    };
    swap_and_action(params, ibc_transfer_action(&ibc_info)).to_string()
}

fn ibc_transfer_action(ibc_info: &IbcInfo) -> Value {
    json!({
        "ibc_transfer": {
            "ibc_info": {
                "source_channel": ibc_info.source_channel,
                "receiver": ibc_info.receiver,
                "memo": ibc_info.memo,
                "recover_address": ibc_info.recover_address,
            }
        }
    })
}

/// Builds the raw `swap_and_action` JSON value (for shape 5, which splices
/// this into a `forward.next`) without serializing to a string first.
pub fn build_swap_value(params: &SwapParams, to_address: &str) -> Value {
    swap_and_action(params, json!({ "transfer": { "to_address": to_address } }))
}

pub fn build_swap_forward_value(params: &SwapParams, ibc_info: &IbcInfo) -> Value {
    swap_and_action(params, ibc_transfer_action(ibc_info))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SwapParams {
        SwapParams {
            hook_contract: "osmo1hook".to_string(),
            venue: "osmosis-poolmanager".to_string(),
            operations: vec![SwapOperation {
                pool: "1".to_string(),
                denom_in: "ibc/AAA".to_string(),
                denom_out: "uosmo".to_string(),
            }],
            min_asset: MinAsset {
                denom: "uosmo".to_string(),
                amount: "990000".to_string(),
            },
            timeout_ns: 600_000_000_000,
        }
    }

    #[test]
    fn shape_2_emits_transfer_post_swap_action() {
        let memo = build_swap(&params(), "osmo1receiver");
        let value: serde_json::Value = serde_json::from_str(&memo).unwrap();
        let msg = &value["wasm"]["msg"]["swap_and_action"];
        assert_eq!(msg["post_swap_action"]["transfer"]["to_address"], "osmo1receiver");
        assert_eq!(msg["affiliates"], serde_json::json!([]));
    }

    #[test]
    fn shape_3_emits_ibc_transfer_post_swap_action() {
        let ibc_info = IbcInfo {
            source_channel: "channel-42".to_string(),
            receiver: "juno1receiver".to_string(),
            memo: None,
            recover_address: "osmo1sender".to_string(),
        };
        let memo = build_swap_forward(&params(), &ibc_info);
        let value: serde_json::Value = serde_json::from_str(&memo).unwrap();
        let action = &value["wasm"]["msg"]["swap_and_action"]["post_swap_action"]["ibc_transfer"]["ibc_info"];
        assert_eq!(action["source_channel"], "channel-42");
        assert_eq!(action["recover_address"], "osmo1sender");
        assert!(action["memo"].is_null());
    }

    #[test]
    fn shape_4_nests_forward_memo_inside_ibc_info() {
        let hops = vec![ForwardHop {
            channel: "channel-7".to_string(),
            port: "transfer".to_string(),
            receiver: "dest1receiver".to_string(),
            timeout_ns: 600_000_000_000,
        }];
        let memo = build_swap_multihop_forward(&params(), "osmo1sender", "channel-42", &hops);
        let value: serde_json::Value = serde_json::from_str(&memo).unwrap();
        let inner_memo = value["wasm"]["msg"]["swap_and_action"]["post_swap_action"]["ibc_transfer"]["ibc_info"]["memo"]
            .as_str()
            .unwrap();
        let inner: serde_json::Value = serde_json::from_str(inner_memo).unwrap();
        assert_eq!(inner["forward"]["channel"], "channel-7");
    }
}
