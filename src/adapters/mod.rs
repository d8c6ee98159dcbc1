/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports,
/// providing the actual integration with rpm/yum, init scripts, the file
/// system and the console.
pub mod outbound;
