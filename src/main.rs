use color_eyre::eyre::{bail, Result};
use database::{DatabaseGenerator, PlayerDatabase, PlayerLoader, Settings, SettingsLoader};
use engine::utils::TimeEstimation;
use engine::{
    run_batch, CancellationToken, ClubOutcome, ClubSetup, Negotiation, NegotiationOutcome,
};
use env_logger::Env;
use log::{info, warn};
use std::env;
use tokio::signal;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEFAULT_BATCH_RUNS: u64 = 8;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default()
        .default_filter_or("info")
    ).init();

    let is_batch = env::var("MODE") == Ok(String::from("BATCH"));

    let (settings, estimated) = TimeEstimation::estimate(load_settings);
    let settings = settings?;

    info!("settings loaded: {} ms", estimated);

    let (database, estimated) = TimeEstimation::estimate(|| load_players(&settings));
    let database = database?;

    info!("players loaded: {} ms", estimated);

    let buyer = club_setup(&database, &settings.buyer_club, &settings)?;
    let seller = club_setup(&database, &settings.seller_club, &settings)?;

    if buyer.name == seller.name {
        bail!("{} cannot negotiate with itself, pick two different clubs", buyer.name);
    }

    if is_batch {
        let runs = env_number("BATCH_RUNS").unwrap_or(DEFAULT_BATCH_RUNS);
        let first_seed = settings.negotiation.seed.unwrap_or_default();
        let seeds: Vec<u64> = (first_seed..first_seed + runs).collect();

        let config = settings.negotiation.clone();
        let outcomes =
            tokio::task::spawn_blocking(move || run_batch(&config, &buyer, &seller, &seeds))
                .await?;

        for outcome in outcomes {
            let outcome = outcome?;

            info!(
                "seed {}: {} accepted ({:.1}%), buyer {:+.2}, seller {:+.2}",
                outcome.seed,
                outcome.accepted,
                outcome.acceptance_rate() * 100.0,
                outcome.buyer.utility_delta(),
                outcome.seller.utility_delta()
            );
        }

        return Ok(());
    }

    let negotiation = Negotiation::new(settings.negotiation, buyer, seller)?;

    let token = CancellationToken::new();
    let mut handle = tokio::task::spawn_blocking({
        let token = token.clone();
        move || negotiation.run(&token)
    });

    let outcome = tokio::select! {
        outcome = &mut handle => outcome?,
        _ = signal::ctrl_c() => {
            warn!("interrupted, stopping negotiation");
            token.cancel();
            handle.await?
        }
    };

    report(&outcome);

    Ok(())
}

fn load_settings() -> Result<Settings> {
    let mut settings = match env::var("SETTINGS") {
        Ok(path) => SettingsLoader::load_file(path)?,
        Err(_) => SettingsLoader::load()?,
    };

    if let Ok(club) = env::var("BUYER_CLUB") {
        settings.buyer_club = club;
    }

    if let Ok(club) = env::var("SELLER_CLUB") {
        settings.seller_club = club;
    }

    if let Some(seed) = env_number("SEED") {
        settings.negotiation.seed = Some(seed);
    }

    if let Some(rounds) = env_number("ROUNDS") {
        settings.negotiation.max_rounds = rounds;
    }

    settings.negotiation.validate()?;

    Ok(settings)
}

fn load_players(settings: &Settings) -> Result<PlayerDatabase> {
    if let Ok(path) = env::var("PLAYERS_CSV") {
        return Ok(PlayerLoader::load_file(path)?);
    }

    info!("PLAYERS_CSV not set, using sample players");

    let clubs = DatabaseGenerator::sample_clubs(&[
        settings.buyer_club.as_str(),
        settings.seller_club.as_str(),
    ]);

    Ok(DatabaseGenerator::generate(
        &clubs,
        settings.sample_players_per_club,
        settings.negotiation.seed.unwrap_or_default(),
    ))
}

fn club_setup(database: &PlayerDatabase, name: &str, settings: &Settings) -> Result<ClubSetup> {
    let (club, squad) = database.club(name)?;

    if squad.len() < settings.min_players {
        let eligible = database.clubs_with_min_players(settings.min_players);

        bail!(
            "{} has {} players, at least {} required (eligible: {})",
            club,
            squad.len(),
            settings.min_players,
            eligible.join(", ")
        );
    }

    let squad: Vec<_> = squad
        .iter()
        .take(settings.max_players_per_club)
        .cloned()
        .collect();

    Ok(ClubSetup::new(club, squad))
}

fn env_number(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

fn report(outcome: &NegotiationOutcome) {
    info!(
        "{} rounds{} in {} ms, seed {}",
        outcome.rounds_played,
        if outcome.cancelled { " (cancelled)" } else { "" },
        outcome.elapsed_ms,
        outcome.seed
    );

    info!(
        "accepted {} of {} proposals ({:.2}%), {} trades executed",
        outcome.accepted,
        outcome.rounds_played,
        outcome.acceptance_rate() * 100.0,
        outcome.trade_log.executed_count()
    );

    report_club(&outcome.buyer);
    report_club(&outcome.seller);

    if let Some(stats) = outcome.buyer_statistics() {
        info!(
            "{} utility over time: min {:.2}, max {:.2}, mean {:.2}, median {:.2}, sd {:.2}",
            outcome.buyer.club, stats.min, stats.max, stats.mean, stats.median, stats.std_dev
        );
    }

    if let Some(stats) = outcome.seller_statistics() {
        info!(
            "{} utility over time: min {:.2}, max {:.2}, mean {:.2}, median {:.2}, sd {:.2}",
            outcome.seller.club, stats.min, stats.max, stats.mean, stats.median, stats.std_dev
        );
    }

    for movement in outcome.trade_log.movements().iter().rev().take(6) {
        info!(
            "round {}: {} {} -> {}",
            movement.round, movement.player_name, movement.from_club, movement.to_club
        );
    }
}

fn report_club(club: &ClubOutcome) {
    info!(
        "{} ({}): utility {:.2} -> {:.2} ({:+.2}), T = {:.4}",
        club.club,
        club.profile,
        club.initial_utility,
        club.final_utility,
        club.utility_delta(),
        club.final_temperature
    );

    info!(
        "{}: kept {}, received {}, departed {}",
        club.club,
        club.changes.kept.len(),
        club.changes.received.len(),
        club.changes.departed.len()
    );
}
