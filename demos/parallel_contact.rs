use mpi::{
    collective::SystemOperation, environment::Universe, topology::Communicator,
    traits::CommunicatorCollectives,
};
use ndcontact::{
    shapes::add_cuboid,
    traits::{Builder, ContactMesh},
    ContactReport, ContactResolver, MpiExchange, NodalDisplacement, NodalDofMap,
    ProcessBoundingBoxIndex, SimplexMeshBuilder,
};

/// Resolving contact between blocks distributed over several processes
fn main() {
    let universe: Universe = mpi::initialize().unwrap();
    let comm = universe.world();
    let rank = comm.rank() as usize;
    let size = comm.size() as usize;
    let exchange = MpiExchange::new(&comm);

    // Process r holds lower strip r and upper strip r + 1
    let mut b = SimplexMeshBuilder::<f64>::new(3, 3);
    add_cuboid(&mut b, [rank as f64, 0.0, -1.0], [1.0, 1.0, 1.0], [2, 2, 2]);
    add_cuboid(
        &mut b,
        [((rank + 1) % size) as f64, 0.0, 0.1],
        [1.0, 1.0, 1.0],
        [2, 2, 2],
    );
    let mesh = b.create_mesh();

    let master = mesh.boundary_facets_matching(|x| x[2].abs() < 1e-12);
    let slave = mesh.boundary_facets_matching(|x| (x[2] - 0.1).abs() < 1e-12);
    let field = NodalDisplacement::from_fn(&mesh, 3, |x, u| {
        u.fill(0.0);
        if x[2] <= 0.0 {
            u[2] = 0.2;
        }
    });

    // Give every process its own range of global vertex numbers
    let global_vertices = (0..mesh.vertex_count())
        .map(|v| rank * mesh.vertex_count() + v)
        .collect();
    let dofmap = NodalDofMap::with_global_vertices(&mesh, 3, global_vertices);

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
    resolver
        .tabulate_contact_metadata(&mesh, &field, &dofmap, &exchange)
        .unwrap();

    // Every contact is recorded once from each side
    let m2s = resolver.master_to_slave().contact_count();
    let s2m = resolver.slave_to_master().contact_count();
    let mut total_m2s = 0;
    let mut total_s2m = 0;
    comm.all_reduce_into(&m2s, &mut total_m2s, SystemOperation::sum());
    comm.all_reduce_into(&s2m, &mut total_s2m, SystemOperation::sum());
    assert_eq!(total_m2s, total_s2m);

    // Every slave facet lies above some lower strip
    assert_eq!(resolver.slave_to_master().len(), slave.len());

    ContactReport::new(&resolver, &exchange)
        .export_as_ron("_contact_report.ron")
        .unwrap();

    if rank == 0 {
        println!("{total_m2s} contacts between {size} processes");
    }
}
