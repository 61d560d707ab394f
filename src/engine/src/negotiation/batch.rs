use crate::error::NegotiationResult;
use crate::negotiation::{ClubSetup, Negotiation, NegotiationConfig, NegotiationOutcome};
use log::info;
use rayon::prelude::*;

/// Runs one independent negotiation per seed in parallel. Every run owns its clubs,
/// annealing state and random source; results come back in seed order.
pub fn run_batch(
    config: &NegotiationConfig,
    buyer: &ClubSetup,
    seller: &ClubSetup,
    seeds: &[u64],
) -> Vec<NegotiationResult<NegotiationOutcome>> {
    info!("running {} negotiations in parallel", seeds.len());

    seeds
        .par_iter()
        .map(|&seed| {
            let config = NegotiationConfig {
                seed: Some(seed),
                ..config.clone()
            };

            Negotiation::new(config, buyer.clone(), seller.clone())
                .map(|negotiation| negotiation.run_to_completion())
        })
        .collect()
}
