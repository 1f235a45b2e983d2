//! Encoder: record -> property list
//!
//! A linear scan over the plan's leaves. Each leaf is reached through its
//! index chain; no shape walking happens here.

use std::any::{type_name, TypeId};
use strata_core::{Property, PropertyList, PropertyValue, Timestamp, ValueKind};

use crate::error::EncodeError;
use crate::plan::{FieldPlan, LeafDescriptor, Multiplicity};
use crate::shape::{FieldRef, Record};

/// Encode `record` into an ordered property list
///
/// Scalar leaves yield one entry each; sequence leaves yield one entry per
/// element in element order, and nothing when empty. A zero timestamp on an
/// `auto_now` leaf is emitted as the current time. The record itself is not
/// modified.
///
/// # Errors
///
/// Fails only when `plan` was built for another type or the record's
/// accessors disagree with its declared shape.
pub fn encode<R: Record>(record: &R, plan: &FieldPlan) -> Result<PropertyList, EncodeError> {
    encode_with_clock(record, plan, Timestamp::now)
}

/// [`encode`] with an explicit clock for `auto_now` leaves
///
/// The clock is read at most once per call, so every stamped leaf of one
/// record carries the same time.
pub fn encode_with_clock<R: Record>(
    record: &R,
    plan: &FieldPlan,
    now: impl Fn() -> Timestamp,
) -> Result<PropertyList, EncodeError> {
    if plan.type_id() != TypeId::of::<R>() {
        return Err(EncodeError::PlanMismatch {
            plan: plan.shape_name().to_string(),
            record: type_name::<R>(),
        });
    }

    let mut properties = PropertyList::with_capacity(plan.len());
    let mut stamp: Option<Timestamp> = None;

    for leaf in plan.leaves() {
        match (leaf.multiplicity(), locate(record, leaf.location())) {
            (Multiplicity::Scalar, Some(FieldRef::Scalar(slot))) => {
                check_kind(plan, leaf, slot.kind())?;
                let mut value = slot.get();
                if leaf.auto_now() {
                    if let PropertyValue::Timestamp(t) = value {
                        if t.is_zero() {
                            value = PropertyValue::Timestamp(*stamp.get_or_insert_with(&now));
                        }
                    }
                }
                properties.push(entry(leaf, value));
            }
            (Multiplicity::Sequence, Some(FieldRef::Sequence(slot))) => {
                check_kind(plan, leaf, slot.kind())?;
                for value in slot.values() {
                    properties.push(entry(leaf, value));
                }
            }
            (multiplicity, _) => {
                return Err(EncodeError::Inaccessible {
                    shape: plan.shape_name().to_string(),
                    field: leaf.path().to_string(),
                    expected: accessor_name(multiplicity),
                });
            }
        }
    }
    Ok(properties)
}

/// Follow an index chain from `record` to a leaf
fn locate<'a>(record: &'a dyn Record, location: &[usize]) -> Option<FieldRef<'a>> {
    let (last, parents) = location.split_last()?;
    let mut current = record;
    for &index in parents {
        current = match current.field(index)? {
            FieldRef::Record(nested) => nested,
            _ => return None,
        };
    }
    current.field(*last)
}

fn check_kind(plan: &FieldPlan, leaf: &LeafDescriptor, found: ValueKind) -> Result<(), EncodeError> {
    if found == leaf.kind() {
        return Ok(());
    }
    Err(EncodeError::KindMismatch {
        shape: plan.shape_name().to_string(),
        field: leaf.path().to_string(),
        expected: leaf.kind(),
        found,
    })
}

fn entry(leaf: &LeafDescriptor, value: PropertyValue) -> Property {
    Property {
        name: leaf.name().to_string(),
        value,
        indexed: leaf.indexed(),
    }
}

pub(crate) fn accessor_name(multiplicity: Multiplicity) -> &'static str {
    match multiplicity {
        Multiplicity::Scalar => "scalar",
        Multiplicity::Sequence => "sequence",
    }
}
