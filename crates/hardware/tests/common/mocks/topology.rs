use mockall::mock;
use rhea_core::soc::topology::Topology;

mock! {
    pub Sockets {}
    impl Topology for Sockets {
        fn socket_count(&self) -> usize;
        fn check_hart_ids_contiguous(&self, socket: usize) -> bool;
        fn first_hart_id(&self, socket: usize) -> Option<u32>;
        fn hart_count(&self, socket: usize) -> Option<u32>;
    }
}

/// A single socket holding `num_harts` harts starting at `hart_id_base`.
pub fn single_socket(hart_id_base: u32, num_harts: u32) -> MockSockets {
    let mut topo = MockSockets::new();
    topo.expect_socket_count().return_const(1usize);
    topo.expect_check_hart_ids_contiguous().return_const(true);
    topo.expect_first_hart_id().return_const(Some(hart_id_base));
    topo.expect_hart_count().return_const(Some(num_harts));
    topo
}

/// A topology the validator must reject before asking about any socket.
pub fn untouched_sockets(count: usize) -> MockSockets {
    let mut topo = MockSockets::new();
    topo.expect_socket_count().return_const(count);
    topo.expect_check_hart_ids_contiguous().never();
    topo.expect_first_hart_id().never();
    topo.expect_hart_count().never();
    topo
}
