//! Properties of distributed contact resolution
use ndcontact::{
    error::Result,
    shapes::add_cuboid,
    traits::{Builder, ContactMesh, Exchange, Payload},
    types::{ContactOptions, FacetContactMap, PairingStrategy},
    ContactError, ContactResolver, NodalDisplacement, ProcessBoundingBoxIndex, SerialExchange,
    SimplexMesh, SimplexMeshBuilder, ThreadGroup,
};
use std::{any::TypeId, collections::BTreeSet};

const NPROCESSES: usize = 3;

type Key = [i64; 3];

/// Lower blocks have their master surface at z = 0, upper blocks their slave surface at z = 0.2
fn add_block(b: &mut SimplexMeshBuilder<f64>, strip: usize, upper: bool) {
    let z = if upper { 0.2 } else { -1.0 };
    add_cuboid(b, [strip as f64, 0.0, z], [1.0, 1.0, 1.0], [2, 2, 1]);
}

fn is_master(x: &[f64]) -> bool {
    x[2].abs() < 1e-12
}

fn is_slave(x: &[f64]) -> bool {
    (x[2] - 0.2).abs() < 1e-12
}

fn displacement(x: &[f64], u: &mut [f64]) {
    u.fill(0.0);
    if x[2] <= 0.0 {
        u[2] = 0.3;
    }
}

/// Identify a facet by its midpoint
fn facet_keys(mesh: &SimplexMesh<f64>) -> Vec<Key> {
    let mut midpoint = [0.0; 3];
    (0..mesh.facet_count())
        .map(|f| {
            mesh.facet_midpoint(f, &mut midpoint);
            midpoint.map(|x| (x * 1e6).round() as i64)
        })
        .collect()
}

fn resolve(
    mesh: &SimplexMesh<f64>,
    exchange: &impl Exchange,
    options: ContactOptions,
) -> ContactResolver<f64> {
    let master = mesh.boundary_facets_matching(is_master);
    let slave = mesh.boundary_facets_matching(is_slave);
    let field = NodalDisplacement::from_fn(mesh, 3, displacement);
    let mut resolver = ContactResolver::new(options);
    resolver
        .resolve_contact_surfaces(
            mesh,
            &field,
            &master,
            &slave,
            exchange,
            &ProcessBoundingBoxIndex,
        )
        .unwrap();
    resolver
}

struct RankResult {
    keys: Vec<Key>,
    master_to_slave: FacetContactMap,
    slave_to_master: FacetContactMap,
}

/// Rank `r` holds lower strip `r` and upper strip `r + 1`
fn run_distributed(options: ContactOptions) -> Vec<RankResult> {
    ThreadGroup::run(NPROCESSES, |exchange| {
        let rank = exchange.rank();
        let mut b = SimplexMeshBuilder::new(3, 3);
        add_block(&mut b, rank, false);
        add_block(&mut b, (rank + 1) % NPROCESSES, true);
        let mesh = b.create_mesh();
        let resolver = resolve(&mesh, &exchange, options);
        RankResult {
            keys: facet_keys(&mesh),
            master_to_slave: resolver.master_to_slave().clone(),
            slave_to_master: resolver.slave_to_master().clone(),
        }
    })
}

/// All contacts as (master key, slave key)
fn distributed_pairs(results: &[RankResult]) -> (BTreeSet<(Key, Key)>, BTreeSet<(Key, Key)>) {
    let mut from_master = BTreeSet::new();
    let mut from_slave = BTreeSet::new();
    for r in results {
        for (f, entries) in r.master_to_slave.iter() {
            for e in entries {
                assert!(from_master.insert((r.keys[f], results[e.rank].keys[e.facet])));
            }
        }
        for (f, entries) in r.slave_to_master.iter() {
            for e in entries {
                assert!(from_slave.insert((results[e.rank].keys[e.facet], r.keys[f])));
            }
        }
    }
    (from_master, from_slave)
}

#[test]
fn test_facet_maps_are_symmetric() {
    let results = run_distributed(ContactOptions::default());
    for (rank, r) in results.iter().enumerate() {
        for (f, entries) in r.master_to_slave.iter() {
            for e in entries {
                assert!(results[e.rank].slave_to_master.contains(e.facet, rank, f));
            }
        }
        for (f, entries) in r.slave_to_master.iter() {
            for e in entries {
                assert!(results[e.rank].master_to_slave.contains(e.facet, rank, f));
            }
        }
    }
    let (from_master, from_slave) = distributed_pairs(&results);
    assert!(!from_master.is_empty());
    assert_eq!(from_master, from_slave);
}

#[test]
fn test_remote_contacts_are_found() {
    let results = run_distributed(ContactOptions::default());
    for (rank, r) in results.iter().enumerate() {
        let remote = r
            .master_to_slave
            .iter()
            .flat_map(|(_, entries)| entries)
            .filter(|e| e.rank != rank)
            .count();
        assert!(remote > 0);
    }
}

#[test]
fn test_local_contacts_come_first() {
    let results = run_distributed(ContactOptions::default());
    for (rank, r) in results.iter().enumerate() {
        for map in [&r.master_to_slave, &r.slave_to_master] {
            for (_, entries) in map.iter() {
                let local = entries.iter().take_while(|e| e.rank == rank).count();
                assert!(entries[local..].iter().all(|e| e.rank != rank));
            }
        }
    }
}

#[test]
fn test_distributed_matches_serial() {
    let results = run_distributed(ContactOptions::default());
    let (from_master, _) = distributed_pairs(&results);

    let mut b = SimplexMeshBuilder::new(3, 3);
    for strip in 0..NPROCESSES {
        add_block(&mut b, strip, false);
        add_block(&mut b, strip, true);
    }
    let mesh = b.create_mesh();
    let resolver = resolve(&mesh, &SerialExchange, ContactOptions::default());
    let keys = facet_keys(&mesh);
    let serial = resolver
        .master_to_slave()
        .iter()
        .flat_map(|(f, entries)| entries.iter().map(move |e| (f, e.facet)))
        .map(|(m, s)| (keys[m], keys[s]))
        .collect::<BTreeSet<_>>();

    assert_eq!(serial, from_master);
}

#[test]
fn test_pairing_strategies_agree() {
    let exhaustive = run_distributed(ContactOptions::with_pairing(PairingStrategy::Exhaustive));
    let bounding_box = run_distributed(ContactOptions::with_pairing(PairingStrategy::BoundingBox));
    for (a, b) in exhaustive.iter().zip(&bounding_box) {
        assert_eq!(a.master_to_slave, b.master_to_slave);
        assert_eq!(a.slave_to_master, b.slave_to_master);
    }
}

#[test]
fn test_repeated_passes_agree() {
    let results = ThreadGroup::run(NPROCESSES, |exchange| {
        let rank = exchange.rank();
        let mut b = SimplexMeshBuilder::new(3, 3);
        add_block(&mut b, rank, false);
        add_block(&mut b, (rank + 1) % NPROCESSES, true);
        let mesh = b.create_mesh();
        let master = mesh.boundary_facets_matching(is_master);
        let slave = mesh.boundary_facets_matching(is_slave);
        let field = NodalDisplacement::from_fn(&mesh, 3, displacement);

        let mut resolver = ContactResolver::default();
        let mut maps = vec![];
        for _ in 0..2 {
            resolver
                .resolve_contact_surfaces(
                    &mesh,
                    &field,
                    &master,
                    &slave,
                    &exchange,
                    &ProcessBoundingBoxIndex,
                )
                .unwrap();
            maps.push((
                resolver.master_to_slave().clone(),
                resolver.slave_to_master().clone(),
            ));
        }
        maps
    });
    for maps in results {
        assert!(!maps[0].0.is_empty());
        assert_eq!(maps[0], maps[1]);
    }
}

#[test]
fn test_ranks_without_facets_take_part() {
    // Only rank 0 has a mesh with contact surfaces
    let results = ThreadGroup::run(2, |exchange| {
        let mut b = SimplexMeshBuilder::new(3, 3);
        add_block(&mut b, 0, false);
        add_block(&mut b, 0, true);
        let mesh = b.create_mesh();
        let (master, slave) = if exchange.rank() == 0 {
            (
                mesh.boundary_facets_matching(is_master),
                mesh.boundary_facets_matching(is_slave),
            )
        } else {
            (vec![], vec![])
        };
        let field = NodalDisplacement::from_fn(&mesh, 3, displacement);
        let mut resolver = ContactResolver::default();
        resolver
            .resolve_contact_surfaces(
                &mesh,
                &field,
                &master,
                &slave,
                &exchange,
                &ProcessBoundingBoxIndex,
            )
            .unwrap();
        resolver.master_to_slave().contact_count()
    });
    assert!(results[0] > 0);
    assert_eq!(results[1], 0);
}

#[test]
fn test_manifold_mesh_is_rejected() {
    let mut b = SimplexMeshBuilder::new(3, 2);
    b.add_point(0, &[0.0, 0.0, 0.0]);
    b.add_point(1, &[1.0, 0.0, 0.0]);
    b.add_point(2, &[0.0, 1.0, 0.0]);
    b.add_cell(0, &[0, 1, 2]);
    let mesh = b.create_mesh();
    let field = NodalDisplacement::uniform(&mesh, &[0.0, 0.0, 0.0]);

    let mut resolver = ContactResolver::<f64>::default();
    let result = resolver.resolve_contact_surfaces(
        &mesh,
        &field,
        &[0],
        &[1],
        &SerialExchange,
        &ProcessBoundingBoxIndex,
    );
    assert!(matches!(
        result,
        Err(ContactError::ManifoldMesh { tdim: 2, gdim: 3 })
    ));
}

#[test]
fn test_unsupported_dimension_is_rejected() {
    let mut b = SimplexMeshBuilder::new(1, 1);
    b.add_point(0, &[0.0]);
    b.add_point(1, &[1.0]);
    b.add_cell(0, &[0, 1]);
    let mesh = b.create_mesh();
    let field = NodalDisplacement::uniform(&mesh, &[0.0]);

    let mut resolver = ContactResolver::<f64>::default();
    let result = resolver.resolve_contact_surfaces(
        &mesh,
        &field,
        &[0],
        &[1],
        &SerialExchange,
        &ProcessBoundingBoxIndex,
    );
    assert!(matches!(result, Err(ContactError::UnsupportedDimension(1))));
}

#[test]
fn test_failed_pass_leaves_no_results() {
    let mut b = SimplexMeshBuilder::new(3, 3);
    add_block(&mut b, 0, false);
    add_block(&mut b, 0, true);
    let mesh = b.create_mesh();
    let master = mesh.boundary_facets_matching(is_master);
    let slave = mesh.boundary_facets_matching(is_slave);
    let field = NodalDisplacement::from_fn(&mesh, 3, displacement);

    let mut resolver = ContactResolver::default();
    resolver
        .resolve_contact_surfaces(
            &mesh,
            &field,
            &master,
            &slave,
            &SerialExchange,
            &ProcessBoundingBoxIndex,
        )
        .unwrap();
    assert!(!resolver.master_to_slave().is_empty());

    let mut overlapping = slave.clone();
    overlapping.push(master[0]);
    let result = resolver.resolve_contact_surfaces(
        &mesh,
        &field,
        &master,
        &overlapping,
        &SerialExchange,
        &ProcessBoundingBoxIndex,
    );
    assert!(matches!(result, Err(ContactError::FacetInBothSets(f)) if f == master[0]));
    assert!(resolver.master_to_slave().is_empty());
    assert!(resolver.slave_to_master().is_empty());
}

/// Pretends to be rank 0 of two processes and loses the last index of every index buffer
struct LossyExchange;

impl Exchange for LossyExchange {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        2
    }

    fn all_to_all<X: Payload>(&self, send: &[Vec<X>]) -> Result<Vec<Vec<X>>> {
        let mut recv = send.to_vec();
        if TypeId::of::<X>() == TypeId::of::<usize>() {
            for data in recv.iter_mut() {
                data.pop();
            }
        }
        Ok(recv)
    }
}

#[test]
fn test_inconsistent_payload_is_reported() {
    let mut b = SimplexMeshBuilder::new(3, 3);
    add_block(&mut b, 0, false);
    add_block(&mut b, 0, true);
    let mesh = b.create_mesh();
    let master = mesh.boundary_facets_matching(is_master);
    let slave = mesh.boundary_facets_matching(is_slave);
    let field = NodalDisplacement::from_fn(&mesh, 3, displacement);

    let mut resolver = ContactResolver::default();
    let result = resolver.resolve_contact_surfaces(
        &mesh,
        &field,
        &master,
        &slave,
        &LossyExchange,
        &ProcessBoundingBoxIndex,
    );
    assert!(matches!(
        result,
        Err(ContactError::PayloadMismatch {
            rank: 1,
            what: "prism coordinates",
            ..
        })
    ));
    assert!(resolver.master_to_slave().is_empty());
}
