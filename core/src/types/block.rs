use serde::{Deserialize, Serialize};

/// Acceptance status the upstream stream attached to a delivered block.
///
/// The finality level a stream runs at is upstream configuration, the
/// transform only carries the status through. A status string this version
/// does not know yet maps to `Unknown` instead of rejecting the block.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    #[serde(rename = "DATA_STATUS_PENDING")]
    Pending,

    #[serde(rename = "DATA_STATUS_ACCEPTED")]
    Accepted,

    #[serde(rename = "DATA_STATUS_FINALIZED")]
    Finalized,

    #[serde(rename = "DATA_STATUS_UNKNOWN")]
    #[serde(other)]
    #[default]
    Unknown,
}

/// One unit of delivery from the upstream stream: the block status plus the
/// events that survived the upstream address/key filter, in delivery order.
///
/// A block is owned by the invocation processing it and dropped afterwards,
/// nothing is retained across blocks.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Block {
    #[serde(default)]
    pub status: StreamStatus,

    #[serde(default)]
    pub events: Vec<BlockEvent>,
}

/// One on-chain event occurrence bundled with the transaction that produced
/// it. Order inside [`Block::events`] must be preserved through processing.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlockEvent {
    pub transaction: Transaction,

    pub event: EventDetails,
}

/// Envelope of the originating transaction. Read-only, passed through
/// untouched - the transform never interprets any of these fields.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub meta: TransactionMeta,

    pub invoke_v3: InvokeV3,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    pub hash: String,

    #[serde(default)]
    pub signature: Vec<String>,

    pub nonce: String,

    pub version: String,

    #[serde(default)]
    pub resource_bounds: ResourceBounds,

    pub nonce_data_availability_mode: String,

    pub fee_data_availability_mode: String,

    pub transaction_index: String,
}

/// L1/L2 gas bounds attached to a v3 transaction. Either side can be missing
/// entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_gas: Option<GasBounds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_gas: Option<GasBounds>,
}

/// `maxAmount` and `maxPricePerUnit` are independently optional - the stream
/// regularly delivers an `l2Gas` object carrying a `maxAmount` but no price
/// data at all, and that must decode fine.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GasBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price_per_unit: Option<PricePerUnit>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PricePerUnit {
    pub high: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvokeV3 {
    pub sender_address: String,

    #[serde(default)]
    pub calldata: Vec<String>,
}

/// The decoded event payload. `from_address` is the contract that emitted
/// the event (the yielder); `data[0]`, when present, is the depositer.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub from_address: String,

    #[serde(default)]
    pub keys: Vec<String>,

    #[serde(default)]
    pub data: Vec<String>,

    pub index: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit_event_json() -> &'static str {
        r#"
        {
            "transaction": {
                "meta": {
                    "hash": "0x0721",
                    "signature": ["0x1", "0x2"],
                    "nonce": "0x2a",
                    "version": "0x3",
                    "resourceBounds": {
                        "l1Gas": {
                            "maxAmount": "0x1f40",
                            "maxPricePerUnit": { "high": "0x5af3107a4000" }
                        },
                        "l2Gas": {
                            "maxAmount": "0x0"
                        }
                    },
                    "nonceDataAvailabilityMode": "DA_MODE_L1",
                    "feeDataAvailabilityMode": "DA_MODE_L1",
                    "transactionIndex": "7"
                },
                "invokeV3": {
                    "senderAddress": "0x0dead",
                    "calldata": ["0x1", "0x0beef"]
                }
            },
            "event": {
                "fromAddress": "0x0a",
                "keys": ["0x9149d2123147c5f43d258257fef0b7b969db78269369ebcf5ebb9eef8592f2"],
                "data": ["0x0d1", "0x64"],
                "index": "3"
            }
        }
        "#
    }

    #[test]
    fn block_deserializes_in_delivery_order() {
        let event = deposit_event_json();
        let json = format!(
            r#"{{ "status": "DATA_STATUS_ACCEPTED", "events": [{event}, {event}] }}"#
        );

        let block: Block = serde_json::from_str(&json).unwrap();

        assert_eq!(block.status, StreamStatus::Accepted);
        assert_eq!(block.events.len(), 2);
        assert_eq!(block.events[0].event.from_address, "0x0a");
        assert_eq!(block.events[0].event.data[0], "0x0d1");
        assert_eq!(block.events[0].transaction.invoke_v3.sender_address, "0x0dead");
    }

    #[test]
    fn l2_gas_without_price_per_unit_is_not_an_error() {
        let event: BlockEvent = serde_json::from_str(deposit_event_json()).unwrap();

        let bounds = &event.transaction.meta.resource_bounds;
        let l2_gas = bounds.l2_gas.as_ref().unwrap();
        assert_eq!(l2_gas.max_amount.as_deref(), Some("0x0"));
        assert!(l2_gas.max_price_per_unit.is_none());

        let l1_gas = bounds.l1_gas.as_ref().unwrap();
        assert_eq!(l1_gas.max_price_per_unit.as_ref().unwrap().high, "0x5af3107a4000");
    }

    #[test]
    fn resource_bounds_can_be_missing_entirely() {
        let json = r#"
        {
            "hash": "0x1",
            "nonce": "0x0",
            "version": "0x3",
            "nonceDataAvailabilityMode": "DA_MODE_L1",
            "feeDataAvailabilityMode": "DA_MODE_L1",
            "transactionIndex": "0"
        }
        "#;

        let meta: TransactionMeta = serde_json::from_str(json).unwrap();

        assert!(meta.resource_bounds.l1_gas.is_none());
        assert!(meta.resource_bounds.l2_gas.is_none());
        assert!(meta.signature.is_empty());
    }

    #[test]
    fn unrecognized_status_string_falls_back_to_unknown() {
        let block: Block =
            serde_json::from_str(r#"{ "status": "DATA_STATUS_REVERTED", "events": [] }"#).unwrap();

        assert_eq!(block.status, StreamStatus::Unknown);
    }

    #[test]
    fn status_defaults_to_unknown() {
        let block: Block = serde_json::from_str(r#"{ "events": [] }"#).unwrap();

        assert_eq!(block.status, StreamStatus::Unknown);
        assert!(block.events.is_empty());
    }
}
