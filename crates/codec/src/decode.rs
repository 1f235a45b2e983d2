//! Decoder: property list -> record
//!
//! Incoming entries are resolved against the plan's name lookup, which
//! covers canonical names and aliases alike. A scalar leaf takes the last
//! entry written to it; a sequence leaf collects its entries in arrival
//! order, starting from empty.

use std::any::{type_name, TypeId};
use strata_core::PropertyList;
use tracing::trace;

use crate::config::DecodeOptions;
use crate::encode::accessor_name;
use crate::error::DecodeError;
use crate::field::ValueError;
use crate::plan::{FieldPlan, LeafDescriptor, Multiplicity};
use crate::shape::{FieldMut, Record};

/// Load `properties` into `record`
///
/// Fields with no incoming entry keep their current value, except sequence
/// fields which are always reset. An entry whose name matches no field or
/// alias fails the call unless `options` is tolerant, in which case it is
/// dropped.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the shape and the property involved.
/// On error the record may be partially populated.
pub fn decode<R: Record>(
    properties: &PropertyList,
    plan: &FieldPlan,
    record: &mut R,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    if plan.type_id() != TypeId::of::<R>() {
        return Err(DecodeError::PlanMismatch {
            plan: plan.shape_name().to_string(),
            record: type_name::<R>(),
        });
    }

    for leaf in plan.leaves() {
        if leaf.multiplicity() != Multiplicity::Sequence {
            continue;
        }
        match locate_mut(&mut *record, leaf.location()) {
            Some(FieldMut::Sequence(slot)) => slot.clear(),
            _ => return Err(inaccessible(plan, leaf)),
        }
    }

    for property in properties {
        let leaf = match plan.resolve(&property.name) {
            Some(leaf) => leaf,
            None if options.ignore_unknown_properties => {
                trace!(
                    shape = plan.shape_name(),
                    property = %property.name,
                    "Dropped property with no destination"
                );
                continue;
            }
            None => {
                return Err(DecodeError::NoDestination {
                    shape: plan.shape_name().to_string(),
                    property: property.name.clone(),
                });
            }
        };

        let value = property.value.clone();
        let loaded = match (leaf.multiplicity(), locate_mut(&mut *record, leaf.location())) {
            (Multiplicity::Scalar, Some(FieldMut::Scalar(slot))) => slot.set(value),
            (Multiplicity::Sequence, Some(FieldMut::Sequence(slot))) => slot.push(value),
            _ => return Err(inaccessible(plan, leaf)),
        };

        loaded.map_err(|e| match e {
            ValueError::Mismatch { found } => DecodeError::TypeMismatch {
                shape: plan.shape_name().to_string(),
                property: property.name.clone(),
                expected: leaf.kind(),
                found,
            },
            ValueError::Overflow { value, target } => DecodeError::Overflow {
                shape: plan.shape_name().to_string(),
                property: property.name.clone(),
                value,
                target,
            },
        })?;
    }
    Ok(())
}

/// Follow an index chain from `record` to a leaf, mutably
fn locate_mut<'a>(record: &'a mut dyn Record, location: &[usize]) -> Option<FieldMut<'a>> {
    let (last, parents) = location.split_last()?;
    let mut current = record;
    for &index in parents {
        current = match current.field_mut(index)? {
            FieldMut::Record(nested) => nested,
            _ => return None,
        };
    }
    current.field_mut(*last)
}

fn inaccessible(plan: &FieldPlan, leaf: &LeafDescriptor) -> DecodeError {
    DecodeError::Inaccessible {
        shape: plan.shape_name().to_string(),
        field: leaf.path().to_string(),
        expected: accessor_name(leaf.multiplicity()),
    }
}
