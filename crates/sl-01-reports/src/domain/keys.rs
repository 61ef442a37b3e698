//! Store key layout.
//!
//! Every key starts with a one-byte namespace prefix. Numeric components are
//! big-endian fixed width so prefix scans return records in id order.
//!
//! | Prefix | Key | Value |
//! |--------|-----|-------|
//! | `0x01` | `subspace` | next reason id (u32) |
//! | `0x02` | `subspace ‖ reason` | `Reason` |
//! | `0x03` | `subspace` | next report id (u64) |
//! | `0x04` | `subspace ‖ report` | `Report` |
//! | `0x05` | `subspace ‖ post ‖ reporter` | report id |
//! | `0x06` | `subspace ‖ len(user) ‖ user ‖ reporter` | report id |
//! | `0x07` | - | `Params` |

use crate::domain::entities::ReportTarget;
use shared_types::{Address, PostId, ReasonId, ReportId, SubspaceId};

const SUBSPACE_LEN: usize = 8;
const REASON_LEN: usize = 4;
const REPORT_LEN: usize = 8;

/// Key namespaces of the reports module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    NextReasonId,
    Reason,
    NextReportId,
    Report,
    PostReports,
    UserReports,
    Params,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::NextReasonId => &[0x01],
            KeyPrefix::Reason => &[0x02],
            KeyPrefix::NextReportId => &[0x03],
            KeyPrefix::Report => &[0x04],
            KeyPrefix::PostReports => &[0x05],
            KeyPrefix::UserReports => &[0x06],
            KeyPrefix::Params => &[0x07],
        }
    }

    fn with_subspace(&self, subspace_id: SubspaceId) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(&subspace_id.to_be_bytes());
        key
    }
}

pub fn next_reason_id_key(subspace_id: SubspaceId) -> Vec<u8> {
    KeyPrefix::NextReasonId.with_subspace(subspace_id)
}

pub fn next_report_id_key(subspace_id: SubspaceId) -> Vec<u8> {
    KeyPrefix::NextReportId.with_subspace(subspace_id)
}

/// Prefix of every reason stored in a subspace.
pub fn subspace_reasons_prefix(subspace_id: SubspaceId) -> Vec<u8> {
    KeyPrefix::Reason.with_subspace(subspace_id)
}

pub fn reason_key(subspace_id: SubspaceId, reason_id: ReasonId) -> Vec<u8> {
    let mut key = subspace_reasons_prefix(subspace_id);
    key.extend_from_slice(&reason_id.to_be_bytes());
    key
}

/// Prefix of every report stored in a subspace.
pub fn subspace_reports_prefix(subspace_id: SubspaceId) -> Vec<u8> {
    KeyPrefix::Report.with_subspace(subspace_id)
}

pub fn report_key(subspace_id: SubspaceId, report_id: ReportId) -> Vec<u8> {
    let mut key = subspace_reports_prefix(subspace_id);
    key.extend_from_slice(&report_id.to_be_bytes());
    key
}

/// Prefix of the content index entries of one post.
pub fn post_reports_prefix(subspace_id: SubspaceId, post_id: PostId) -> Vec<u8> {
    let mut key = KeyPrefix::PostReports.with_subspace(subspace_id);
    key.extend_from_slice(&post_id.to_be_bytes());
    key
}

/// Prefix of the content index entries of one reported user.
///
/// The user address is length-prefixed so one address is never a prefix of
/// another.
pub fn user_reports_prefix(subspace_id: SubspaceId, user: &Address) -> Vec<u8> {
    let mut key = KeyPrefix::UserReports.with_subspace(subspace_id);
    let bytes = user.as_str().as_bytes();
    // Addresses are at most 90 bytes long
    key.push(bytes.len() as u8);
    key.extend_from_slice(bytes);
    key
}

/// Prefix of the content index entries of one target.
pub fn target_reports_prefix(subspace_id: SubspaceId, target: &ReportTarget) -> Vec<u8> {
    match target {
        ReportTarget::Post { post_id } => post_reports_prefix(subspace_id, *post_id),
        ReportTarget::User { user } => user_reports_prefix(subspace_id, user),
    }
}

/// Content index key: one entry per `(target, reporter)` pair.
pub fn content_key(subspace_id: SubspaceId, target: &ReportTarget, reporter: &Address) -> Vec<u8> {
    let mut key = target_reports_prefix(subspace_id, target);
    key.extend_from_slice(reporter.as_str().as_bytes());
    key
}

pub fn params_key() -> Vec<u8> {
    KeyPrefix::Params.as_bytes().to_vec()
}

// =============================================================================
// DECODING
// =============================================================================

fn read_u64(bytes: &[u8]) -> Option<u64> {
    let array: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(array))
}

fn read_u32(bytes: &[u8]) -> Option<u32> {
    let array: [u8; 4] = bytes.try_into().ok()?;
    Some(u32::from_be_bytes(array))
}

/// Subspace id of any key except the params key.
pub fn subspace_from_key(key: &[u8]) -> Option<SubspaceId> {
    key.get(1..1 + SUBSPACE_LEN).and_then(read_u64)
}

/// `(subspace, reason)` ids of a reason key.
pub fn split_reason_key(key: &[u8]) -> Option<(SubspaceId, ReasonId)> {
    let subspace_id = key.get(1..1 + SUBSPACE_LEN).and_then(read_u64)?;
    let reason_id = key
        .get(1 + SUBSPACE_LEN..1 + SUBSPACE_LEN + REASON_LEN)
        .and_then(read_u32)?;
    Some((subspace_id, reason_id))
}

/// `(subspace, report)` ids of a report key.
pub fn split_report_key(key: &[u8]) -> Option<(SubspaceId, ReportId)> {
    let subspace_id = key.get(1..1 + SUBSPACE_LEN).and_then(read_u64)?;
    let report_id = key
        .get(1 + SUBSPACE_LEN..1 + SUBSPACE_LEN + REPORT_LEN)
        .and_then(read_u64)?;
    Some((subspace_id, report_id))
}

pub fn encode_reason_id(id: ReasonId) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

pub fn decode_reason_id(bytes: &[u8]) -> Option<ReasonId> {
    read_u32(bytes)
}

pub fn encode_report_id(id: ReportId) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

pub fn decode_report_id(bytes: &[u8]) -> Option<ReportId> {
    read_u64(bytes)
}
