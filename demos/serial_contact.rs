use ndcontact::{
    shapes::add_cuboid,
    traits::{Builder, ContactMesh},
    ContactResolver, NodalDisplacement, NodalDofMap, ProcessBoundingBoxIndex, SerialExchange,
    SimplexMeshBuilder,
};

/// Resolving contact between two blocks on a single process
fn main() {
    // A lower block with its top at z = 0 and an upper block with its bottom at z = 0.1
    let mut b = SimplexMeshBuilder::<f64>::new(3, 3);
    add_cuboid(&mut b, [0.0, 0.0, -1.0], [1.0, 1.0, 1.0], [4, 4, 2]);
    add_cuboid(&mut b, [0.25, 0.25, 0.1], [0.5, 0.5, 0.5], [2, 2, 2]);
    let mesh = b.create_mesh();

    let master = mesh.boundary_facets_matching(|x| x[2].abs() < 1e-12);
    let slave = mesh.boundary_facets_matching(|x| (x[2] - 0.1).abs() < 1e-12);

    // Push the lower block up by 0.2
    let field = NodalDisplacement::from_fn(&mesh, 3, |x, u| {
        u.fill(0.0);
        if x[2] <= 0.0 {
            u[2] = 0.2;
        }
    });
    let dofmap = NodalDofMap::new(&mesh, 3);

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
    resolver
        .tabulate_contact_metadata(&mesh, &field, &dofmap, &SerialExchange)
        .unwrap();

    println!(
        "{} of {} master facets touch {} of {} slave facets",
        resolver.master_to_slave().len(),
        master.len(),
        resolver.slave_to_master().len(),
        slave.len()
    );

    // Every slave facet sits above the lower block, so all of them are hit
    assert_eq!(resolver.slave_to_master().len(), slave.len());
    for (facet, cells) in resolver.metadata().iter() {
        assert!(facet < mesh.facet_count());
        for cell in cells {
            assert_eq!(cell.dofs.len(), 12);
        }
    }
}
