//! Property test: pool and table partition the header set.
//!
//! Whatever sequence of map/unmap/clear operations runs, every header from
//! the ingestion batch is in exactly one of {pool, one binding}.

use std::collections::BTreeSet;

use bcm_map::{HeaderPool, MappingTable};
use bcm_model::{FieldId, HeaderId, SourceHeader, TargetSchema};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    /// Take the pool header at this position (mod pool size) and bind it
    /// to the field at this index (mod field count).
    Map { header_slot: usize, field_slot: usize },
    /// Unbind the field at this index if bound, restoring its header.
    Unmap { field_slot: usize },
    /// Clear every binding and restore all headers.
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..32, 0usize..32)
            .prop_map(|(header_slot, field_slot)| Op::Map { header_slot, field_slot }),
        (0usize..32).prop_map(|field_slot| Op::Unmap { field_slot }),
        Just(Op::Reset),
    ]
}

fn batch(n: usize) -> Vec<SourceHeader> {
    (0..n)
        .map(|i| SourceHeader::new(HeaderId::new(format!("header_{i}")).unwrap(), format!("Col {i}")))
        .collect()
}

fn assert_partition(pool: &HeaderPool, table: &MappingTable, all: &BTreeSet<HeaderId>) {
    let pool_ids: BTreeSet<HeaderId> = pool.snapshot().iter().map(|h| h.id.clone()).collect();
    let bound_ids: BTreeSet<HeaderId> = table.bindings().map(|(_, h)| h.id.clone()).collect();

    assert!(
        pool_ids.is_disjoint(&bound_ids),
        "header present in both pool and table"
    );
    let union: BTreeSet<HeaderId> = pool_ids.union(&bound_ids).cloned().collect();
    assert_eq!(&union, all, "headers lost or duplicated");
    assert_eq!(pool_ids.len() + bound_ids.len(), all.len());
}

proptest! {
    #[test]
    fn pool_and_table_always_partition_headers(
        header_count in 1usize..12,
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let schema = TargetSchema::bigcommerce();
        let fields: Vec<FieldId> = schema.fields().map(|f| f.id.clone()).collect();

        let headers = batch(header_count);
        let all: BTreeSet<HeaderId> = headers.iter().map(|h| h.id.clone()).collect();

        let mut pool = HeaderPool::new();
        pool.load(headers).unwrap();
        let mut table = MappingTable::for_schema(&schema);

        for op in ops {
            match op {
                Op::Map { header_slot, field_slot } => {
                    if pool.is_empty() {
                        continue;
                    }
                    let header_id = pool.snapshot()[header_slot % pool.len()].id.clone();
                    let field_id = fields[field_slot % fields.len()].clone();
                    let header = pool.take(&header_id).unwrap();
                    let evicted = table.bind(&field_id, header).unwrap();
                    if let Some(previous) = evicted {
                        pool.restore(previous).unwrap();
                    }
                }
                Op::Unmap { field_slot } => {
                    let field_id = fields[field_slot % fields.len()].clone();
                    if table.is_bound(&field_id) {
                        let header = table.unbind(&field_id).unwrap();
                        pool.restore(header).unwrap();
                    }
                }
                Op::Reset => {
                    for header in table.clear() {
                        pool.restore(header).unwrap();
                    }
                }
            }
            assert_partition(&pool, &table, &all);
        }
    }
}
