use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use gacha_core::{
    BaseStats, BattleConfig, BattleExit, CatalogEntry, FirstMovePolicy, Move, Rarity,
    Reward, RosterStore, SaveData,
};
use gacha_runtime::{
    CatalogOracleImpl, Event, FileRosterRepository, InMemoryRosterRepo, OracleManager, Pacing,
    PlayerIntent, RepositoryError, RosterEvent, RosterRepository, Runtime, RuntimeConfig,
    ScriptedProvider, StrongestMoveProvider, Topic,
};
use tokio::sync::broadcast;

fn entry(id: u32, name: &str, stats: BaseStats, damage: u32) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        rarity: Rarity::Common,
        stats: Some(stats),
        moves: vec![Move::new("Hit", damage, "")],
    }
}

/// Boss with 100 HP that hits for 50.
fn boss() -> CatalogEntry {
    CatalogEntry {
        id: 99,
        name: BattleConfig::DEFAULT_BOSS_NAME.to_string(),
        rarity: Rarity::Legendary,
        stats: Some(BaseStats::new(100, 50, 0)),
        moves: Vec::new(),
    }
}

fn weakling() -> CatalogEntry {
    entry(1, "Weakling", BaseStats::new(10, 1, 0), 1)
}

fn bruiser() -> CatalogEntry {
    entry(2, "Bruiser", BaseStats::new(300, 200, 0), 20)
}

fn oracles() -> OracleManager {
    let catalog = CatalogOracleImpl::from_entries([weakling(), bruiser(), boss()]);
    OracleManager::new(Arc::new(catalog), &BattleConfig::default()).with_policy(FirstMovePolicy)
}

fn roster_with(team: &[CatalogEntry]) -> RosterStore {
    let mut roster = RosterStore::new(100);
    for (slot, entry) in team.iter().enumerate() {
        let key = roster.add_to_collection(entry, Utc::now());
        roster.set_slot(slot, Some(key)).expect("free slot");
    }
    roster
}

fn config(pacing: Pacing) -> RuntimeConfig {
    RuntimeConfig {
        pacing,
        seed: Some(7),
        ..RuntimeConfig::default()
    }
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn notices(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Notice(notice) => Some(notice.message.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn victory_grants_gold_and_saves_roster() {
    let repository = Arc::new(InMemoryRosterRepo::new());
    let mut runtime = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .repository(repository.clone())
        .roster(roster_with(&[bruiser()]))
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");
    let mut roster_events = runtime.handle().subscribe(Topic::Roster);

    let report = runtime.run_battle().await.expect("battle runs");

    assert_eq!(report.outcome, BattleExit::Victory);
    assert_eq!(report.reward, Some(Reward { gold: 10 }));
    assert_eq!(report.gold, 110);
    assert_eq!(report.turns, 0);

    let saved = repository.load().expect("load").expect("saved after victory");
    assert_eq!(saved.gold, 110);
    assert_eq!(saved.collection.len(), 1);

    let events = drain(&mut roster_events);
    assert!(events.contains(&Event::Roster(RosterEvent::GoldChanged { gold: 110 })));
    assert!(events.contains(&Event::Roster(RosterEvent::Saved {
        outcome: BattleExit::Victory
    })));

    runtime.shutdown().await.expect("shutdown");
}

/// In-memory repository that records every gold grant.
#[derive(Default)]
struct GrantLog {
    inner: InMemoryRosterRepo,
    grants: Mutex<Vec<u64>>,
}

impl RosterRepository for GrantLog {
    fn load(&self) -> Result<Option<SaveData>, RepositoryError> {
        self.inner.load()
    }

    fn save(&self, data: &SaveData) -> Result<(), RepositoryError> {
        self.inner.save(data)
    }

    fn grant_gold(&self, amount: u64) -> Result<u64, RepositoryError> {
        self.grants.lock().expect("grant log").push(amount);
        self.inner.grant_gold(amount)
    }
}

#[tokio::test]
async fn victory_credits_existing_save_through_grant_gold() {
    let repository = Arc::new(GrantLog::default());
    repository
        .save(&roster_with(&[bruiser()]).export())
        .expect("seed save");

    let mut runtime = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .repository(repository.clone())
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");

    let report = runtime.run_battle().await.expect("battle runs");
    runtime.shutdown().await.expect("shutdown");

    assert_eq!(report.outcome, BattleExit::Victory);
    assert_eq!(*repository.grants.lock().expect("grant log"), [10]);
    let saved = repository.load().expect("load").expect("save kept");
    assert_eq!(saved.gold, 110);
    assert_eq!(saved.collection.len(), 1);
}

#[tokio::test]
async fn first_victory_writes_the_whole_roster() {
    let repository = Arc::new(GrantLog::default());
    let mut runtime = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .repository(repository.clone())
        .roster(roster_with(&[bruiser()]))
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");

    runtime.run_battle().await.expect("battle runs");
    runtime.shutdown().await.expect("shutdown");

    assert!(repository.grants.lock().expect("grant log").is_empty());
    let saved = repository.load().expect("load").expect("saved after victory");
    assert_eq!(saved.gold, 110);
    assert_eq!(saved.team.iter().flatten().count(), 1);
}

#[tokio::test]
async fn defeat_pays_nothing_and_skips_save() {
    let repository = Arc::new(InMemoryRosterRepo::new());
    let mut runtime = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .repository(repository.clone())
        .roster(roster_with(&[weakling()]))
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");

    let report = runtime.run_battle().await.expect("battle runs");

    assert_eq!(report.outcome, BattleExit::Defeat);
    assert_eq!(report.reward, None);
    assert_eq!(report.gold, 100);
    assert!(repository.load().expect("load").is_none());

    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn empty_team_reports_no_team_with_notice() {
    let mut runtime = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .roster(RosterStore::new(100))
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");
    let mut notice_rx = runtime.handle().subscribe(Topic::Notice);

    let report = runtime.run_battle().await.expect("battle runs");

    assert_eq!(report.outcome, BattleExit::NoTeam);
    assert_eq!(report.reward, None);
    assert_eq!(report.gold, 100);
    assert_eq!(
        notices(&drain(&mut notice_rx)),
        ["Add characters to your team before battling!"]
    );

    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn swap_to_defeated_unit_is_reported_and_battle_continues() {
    // Weakling strikes, the boss knocks it out, Bruiser is forced in. The
    // scripted swap back to the defeated Weakling is rejected.
    let mut runtime = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .roster(roster_with(&[weakling(), bruiser()]))
        .player_provider(ScriptedProvider::new([
            PlayerIntent::UseMove(0),
            PlayerIntent::Swap(0),
        ]))
        .build()
        .await
        .expect("runtime builds");
    let mut notice_rx = runtime.handle().subscribe(Topic::Notice);

    let report = runtime.run_battle().await.expect("battle runs");

    assert_eq!(report.outcome, BattleExit::Victory);
    assert_eq!(report.turns, 1);
    assert_eq!(
        notices(&drain(&mut notice_rx)),
        ["Bruiser enters the battle!", "Character is defeated!"]
    );

    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn input_while_animating_is_ignored() {
    let runtime = Runtime::builder()
        .config(config(Pacing::Realtime))
        .oracles(oracles())
        .roster(roster_with(&[weakling()]))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    handle.start().await.expect("start");
    handle.submit_move(0).await.expect("first strike accepted");
    handle.submit_move(0).await.expect("second strike dropped silently");

    let session = handle.query_session().await.expect("session");
    assert!(session.is_animating());
    assert_eq!(session.enemy().hp(), 98);

    drop(handle);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn realtime_pacing_waits_out_each_delay() {
    let mut runtime = Runtime::builder()
        .config(config(Pacing::Realtime))
        .oracles(oracles())
        .roster(roster_with(&[weakling()]))
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");

    let started = tokio::time::Instant::now();
    let report = runtime.run_battle().await.expect("battle runs");
    let elapsed = started.elapsed();

    // strike settle + enemy turn + enemy strike settle
    let battle = BattleConfig::default();
    let round = battle.strike_delay() * 2 + battle.enemy_turn_delay();
    assert_eq!(report.outcome, BattleExit::Defeat);
    assert!(elapsed >= round, "finished after {elapsed:?}");
    assert!(elapsed < round + Duration::from_millis(100));

    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn file_repository_carries_gold_between_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(FileRosterRepository::FILE_NAME);

    let repository = Arc::new(FileRosterRepository::new(&path).expect("repository"));
    let mut first = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .repository(repository)
        .roster(roster_with(&[bruiser()]))
        .player_provider(StrongestMoveProvider)
        .build()
        .await
        .expect("runtime builds");
    assert_eq!(first.run_battle().await.expect("battle").gold, 110);
    first.shutdown().await.expect("shutdown");

    let repository = Arc::new(FileRosterRepository::new(&path).expect("repository"));
    let second = Runtime::builder()
        .config(config(Pacing::Instant))
        .oracles(oracles())
        .repository(repository)
        .build()
        .await
        .expect("runtime builds");

    let roster = second.handle().query_roster().await.expect("roster");
    assert_eq!(roster.gold(), 110);
    assert_eq!(roster.team_members().len(), 1);
    let session = second.handle().query_session().await.expect("session");
    assert_eq!(session.players()[0].name(), "Bruiser");

    second.shutdown().await.expect("shutdown");
}
