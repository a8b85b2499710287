use di_abstractions::Discoverable;
use service_macros::service;

trait Repository: Send + Sync {}

#[service(scoped, provides(dyn Repository, Self))]
#[derive(Default)]
struct MemoryRepository<T: Default + Send + Sync + 'static> {
    items: Vec<T>,
}

impl<T: Default + Send + Sync + 'static> Repository for MemoryRepository<T> {}

fn main() {
    assert_eq!(MemoryRepository::<u32>::capabilities().len(), 2);
    assert!(MemoryRepository::<u32>::default().items.is_empty());
}
