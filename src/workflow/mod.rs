pub mod collect;
pub mod enumerate;
pub mod reconcile;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;
