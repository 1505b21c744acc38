//! Contact resolution
//!
//! Every facet of the master and slave surfaces is swept along the displacement field into a
//! prism (a triangular prism in 3D, a quadrilateral in 2D). Facets whose prisms collide are
//! in contact.
mod local;
mod pairing;
mod prism;
mod resolver;
mod tabulation;

pub use local::{check_prism_collision, tabulate_local_pairs};
pub(crate) use pairing::tabulate_off_process_pairs;
pub use prism::{
    cells_per_facet, prism_stride, vertices_per_facet, Prism, SweptMesh, EDGES, TRIANGLES,
};
pub use resolver::ContactResolver;
