//! Engine Integration Tests
//!
//! End-to-end scenarios through the event router over in-memory stores
//! and a recording gateway. No external services are required.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio::sync::mpsc;

use integration_tests::*;
use warden_core::entities::{xp_threshold, BotPrivilege, ConfigUpdate, DEFAULT_WELCOME_TEMPLATE};
use warden_core::{ConfigRepository, Permissions, ProgressionRepository, Snowflake};
use warden_db::{MemoryConfigRepository, MemoryProgressionRepository};
use warden_service::{
    notices, ConfigService, Dispatch, EventPump, EventRouter, LevelingService, RoleMenuService,
};

const OLD_MEMBER: i64 = 30;

fn veteran() -> Duration {
    Duration::days(OLD_MEMBER)
}

// ============================================================================
// Leveling
// ============================================================================

#[tokio::test]
async fn test_five_messages_reach_level_one() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());

    for i in 0..5 {
        let at = epoch() + Duration::seconds(60 * i);
        let dispatch = engine
            .dispatch(message(community, member, "hello", at, veteran()))
            .await;
        assert_eq!(dispatch, Dispatch::Handled);

        let record = engine
            .progressions
            .find(community, member)
            .await
            .unwrap()
            .unwrap();
        if i < 4 {
            assert_eq!((record.level, record.xp), (0, 20 * (i as u64 + 1)));
        } else {
            assert_eq!((record.level, record.xp), (1, 0));
        }
    }

    let notices_sent = engine.gateway.sent_to(Snowflake::new(10));
    assert_eq!(notices_sent.len(), 1);
    assert!(notices_sent[0].contains("reached level 1"));
}

#[tokio::test]
async fn test_random_gains_keep_xp_below_threshold() {
    let engine = TestEngine::random().unwrap();
    let (community, member) = (unique_id(), unique_id());

    for i in 0..50 {
        let at = epoch() + Duration::seconds(60 * i);
        engine
            .dispatch(message(community, member, "spam", at, veteran()))
            .await;

        let record = engine
            .progressions
            .find(community, member)
            .await
            .unwrap()
            .unwrap();
        assert!(record.xp < xp_threshold(record.level));
    }

    let total = LevelingService::new(engine.ctx())
        .progress(community, member)
        .await
        .unwrap()
        .total_xp();
    assert!((50 * 15..=50 * 25).contains(&total));
}

fn counting_router() -> (EventRouter, Arc<RecordingGateway>, Arc<CountingProgressionRepository>) {
    let store = Arc::new(CountingProgressionRepository::new(StdDuration::from_millis(10)));
    let (router, gateway) =
        router_over(Arc::new(MemoryConfigRepository::new()), store.clone(), 20).unwrap();
    (router, gateway, store)
}

#[tokio::test]
async fn test_concurrent_messages_from_one_member() {
    let (router, _, store) = counting_router();
    let router = Arc::new(router);
    let (community, member) = (unique_id(), unique_id());

    // Spread beyond the cooldown so each one qualifies on its own
    let mut handles = Vec::new();
    for i in 0..10 {
        let router = router.clone();
        let event = message(
            community,
            member,
            "hi",
            epoch() + Duration::seconds(60 * i),
            veteran(),
        );
        handles.push(tokio::spawn(async move { router.dispatch(event).await }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Dispatch::Handled);
    }

    let record = store.find(community, member).await.unwrap().unwrap();
    // Every write builds on the one before it
    assert!(store.puts() >= 1);
    assert_eq!(record.total_xp(), 20 * store.puts() as u64);
}

#[tokio::test]
async fn test_racing_messages_both_count() {
    let (router, _, store) = counting_router();
    let (community, member) = (unique_id(), unique_id());

    let (a, b) = tokio::join!(
        router.dispatch(message(community, member, "one", epoch(), veteran())),
        router.dispatch(message(
            community,
            member,
            "two",
            epoch() + Duration::seconds(60),
            veteran()
        )),
    );
    assert_eq!((a, b), (Dispatch::Handled, Dispatch::Handled));

    let record = store.find(community, member).await.unwrap().unwrap();
    assert_eq!(record.xp, 40);
    assert_eq!(store.puts(), 2);
}

#[tokio::test]
async fn test_simultaneous_messages_grant_once() {
    let (router, _, store) = counting_router();
    let (community, member) = (unique_id(), unique_id());

    let (a, b) = tokio::join!(
        router.dispatch(message(community, member, "one", epoch(), veteran())),
        router.dispatch(message(community, member, "two", epoch(), veteran())),
    );
    assert_eq!((a, b), (Dispatch::Handled, Dispatch::Handled));

    let record = store.find(community, member).await.unwrap().unwrap();
    assert_eq!(record.xp, 20);
    assert_eq!(store.puts(), 1);
}

#[tokio::test]
async fn test_leveling_disabled_by_config() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    ConfigService::new(engine.ctx())
        .merge_leveling_enabled(community, false)
        .await
        .unwrap();

    engine
        .dispatch(message(community, member, "hello", epoch(), veteran()))
        .await;

    assert!(engine.progressions.is_empty());
}

#[tokio::test]
async fn test_leaderboard_order() {
    let engine = TestEngine::with_xp(60).unwrap();
    let community = unique_id();
    let (first, second, third) = (unique_id(), unique_id(), unique_id());

    for (member, messages) in [(first, 3), (second, 2), (third, 1)] {
        for i in 0..messages {
            engine
                .dispatch(message(
                    community,
                    member,
                    "gm",
                    epoch() + Duration::seconds(60 * i),
                    veteran(),
                ))
                .await;
        }
    }

    let board = LevelingService::new(engine.ctx())
        .leaderboard(community, 10)
        .await
        .unwrap();
    let order: Vec<Snowflake> = board.iter().map(|r| r.member_id).collect();
    assert_eq!(order, vec![first, second, third]);
}

// ============================================================================
// Automod
// ============================================================================

#[tokio::test]
async fn test_new_member_invite_is_removed() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    let log_channel = unique_id();
    ConfigService::new(engine.ctx())
        .merge_log_channel(community, Some(log_channel))
        .await
        .unwrap();

    let tenure = Duration::days(7) - Duration::seconds(1);
    engine
        .dispatch(message(community, member, "join discord.gg/abc", epoch(), tenure))
        .await;

    let actions = engine.gateway.actions();
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::Delete { channel_id, .. } if *channel_id == Snowflake::new(10))));
    assert_eq!(engine.gateway.sent_to(Snowflake::new(10)).len(), 1);
    assert_eq!(engine.gateway.sent_to(log_channel).len(), 1);
    // Blocked messages earn nothing
    assert!(engine.progressions.is_empty());
}

#[tokio::test]
async fn test_seven_day_member_may_post_invites() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());

    engine
        .dispatch(message(
            community,
            member,
            "join discord.gg/abc",
            epoch(),
            Duration::days(7),
        ))
        .await;

    assert!(!engine
        .gateway
        .actions()
        .iter()
        .any(|a| matches!(a, Action::Delete { .. })));
    assert_eq!(engine.progressions.len(), 1);
}

#[tokio::test]
async fn test_automod_actions_are_independent() {
    let engine = TestEngine::with_xp(20).unwrap();
    engine.gateway.fail("delete_message");
    let (community, member) = (unique_id(), unique_id());

    let dispatch = engine
        .dispatch(message(
            community,
            member,
            "discord.com/invite/xyz",
            epoch(),
            Duration::hours(2),
        ))
        .await;

    assert_eq!(dispatch, Dispatch::Handled);
    assert_eq!(engine.gateway.sent_to(Snowflake::new(10)).len(), 1);
}

// ============================================================================
// Onboarding
// ============================================================================

#[tokio::test]
async fn test_join_with_autorole_and_default_welcome() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member, role) = (unique_id(), unique_id(), unique_id());
    let system_channel = unique_id();
    engine
        .gateway
        .with_community(community, "Ferris Club", Some(system_channel));
    engine.gateway.with_role(role, "Newcomer", 1);
    ConfigService::new(engine.ctx())
        .merge_autorole(community, Some(role))
        .await
        .unwrap();

    assert_eq!(engine.dispatch(join(community, member)).await, Dispatch::Handled);

    assert_eq!(engine.gateway.roles_of(community, member), vec![role]);
    let expected = DEFAULT_WELCOME_TEMPLATE
        .replace("{user}", &member.user_mention())
        .replace("{server}", "Ferris Club");
    assert_eq!(engine.gateway.sent_to(system_channel), vec![expected]);
}

#[tokio::test]
async fn test_join_survives_every_action_failing() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    engine.gateway.with_community(community, "Broken", Some(unique_id()));
    for action in ["send_message", "fetch_role", "add_roles"] {
        engine.gateway.fail(action);
    }
    ConfigService::new(engine.ctx())
        .merge_autorole(community, Some(unique_id()))
        .await
        .unwrap();

    assert_eq!(engine.dispatch(join(community, member)).await, Dispatch::Handled);
    assert!(engine.gateway.actions().is_empty());
}

// ============================================================================
// Role Menus
// ============================================================================

#[tokio::test]
async fn test_role_menu_converges_on_selection() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    let (a, b, c, outside) = (unique_id(), unique_id(), unique_id(), unique_id());
    for (role, name) in [(a, "A"), (b, "B"), (c, "C"), (outside, "Outside")] {
        engine.gateway.with_role(role, name, 5);
    }
    engine.gateway.with_member(community, member, &[a, b, outside]);

    let (event, interaction) = selection(community, member, &[a, b, c], &[b, c]).unwrap();
    assert_eq!(engine.dispatch(event).await, Dispatch::Handled);

    let mut expected = vec![b, c, outside];
    expected.sort();
    assert_eq!(engine.gateway.roles_of(community, member), expected);
    assert!(engine.gateway.actions().contains(&Action::Acknowledge {
        interaction_id: interaction,
        content: notices::ROLES_UPDATED.to_string(),
    }));
}

#[tokio::test]
async fn test_role_menu_repairs_drift() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    let (a, b) = (unique_id(), unique_id());
    engine.gateway.with_role(a, "A", 5);
    engine.gateway.with_role(b, "B", 5);
    engine.gateway.with_member(community, member, &[a, b]);

    // Same selection twice converges to the same state
    for _ in 0..2 {
        let (event, _) = selection(community, member, &[a, b], &[a]).unwrap();
        engine.dispatch(event).await;
        assert_eq!(engine.gateway.roles_of(community, member), vec![a]);
    }
}

#[tokio::test]
async fn test_role_menu_failure_gets_generic_reply() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    let a = unique_id();
    engine.gateway.with_role(a, "A", 5);
    engine.gateway.with_member(community, member, &[]);
    engine.gateway.fail("add_roles");

    let (event, interaction) = selection(community, member, &[a], &[a]).unwrap();
    assert_eq!(engine.dispatch(event).await, Dispatch::Failed);

    assert_eq!(
        engine.gateway.actions(),
        vec![Action::Acknowledge {
            interaction_id: interaction,
            content: notices::INTERACTION_FAILURE.to_string(),
        }]
    );
}

#[tokio::test]
async fn test_role_menu_without_privilege_changes_nothing() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    let a = unique_id();
    engine.gateway.with_role(a, "A", 5);
    engine.gateway.with_member(community, member, &[a]);
    engine.gateway.with_privilege(BotPrivilege {
        permissions: Permissions::SEND_MESSAGES,
        highest_position: 100,
    });

    let (event, _) = selection(community, member, &[a], &[]).unwrap();
    assert_eq!(engine.dispatch(event).await, Dispatch::Handled);
    assert_eq!(engine.gateway.roles_of(community, member), vec![a]);
}

#[tokio::test]
async fn test_published_menu_round_trips_through_selection() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member, channel) = (unique_id(), unique_id(), unique_id());
    let (a, b) = (unique_id(), unique_id());
    engine.gateway.with_role(a, "A", 5);
    engine.gateway.with_role(b, "B", 5);
    engine.gateway.with_member(community, member, &[]);

    let (menu, _) = RoleMenuService::new(engine.ctx())
        .create_menu(community, channel, Some("Colors".to_string()), vec![a, b])
        .await
        .unwrap();

    // The platform echoes the selector id back with the selection
    let event = serde_json::json!({
        "type": "SELECTION_MADE",
        "community_id": community,
        "channel_id": channel,
        "user_id": member,
        "interaction": {"id": "77", "token": "t"},
        "custom_id": menu.custom_id(),
        "values": [b],
        "timestamp": "2024-01-01T00:00:00Z"
    });
    let event = serde_json::from_value(event).unwrap();

    assert_eq!(engine.dispatch(event).await, Dispatch::Handled);
    assert_eq!(engine.gateway.roles_of(community, member), vec![b]);
}

// ============================================================================
// Config
// ============================================================================

#[tokio::test]
async fn test_concurrent_config_merges() {
    let engine = TestEngine::with_xp(20).unwrap();
    let community = unique_id();
    let (channel, role, log) = (unique_id(), unique_id(), unique_id());
    let service = ConfigService::new(engine.ctx());

    let (w, r, l, e) = tokio::join!(
        service.merge_welcome(community, channel, Some("Hi {user}".to_string())),
        service.merge_autorole(community, Some(role)),
        service.merge_log_channel(community, Some(log)),
        service.merge_leveling_enabled(community, false),
    );
    for result in [w, r, l, e] {
        result.unwrap();
    }

    let config = service.get(community).await.unwrap();
    assert_eq!(config.welcome_channel_id, Some(channel));
    assert_eq!(config.welcome_template(), "Hi {user}");
    assert_eq!(config.autorole_id, Some(role));
    assert_eq!(config.log_channel_id, Some(log));
    assert!(!config.leveling_enabled);
}

// ============================================================================
// Store Failures
// ============================================================================

#[tokio::test]
async fn test_progression_store_outage_fails_only_that_message() {
    let store = Arc::new(FailingProgressionRepository::default());
    let (router, gateway) =
        router_over(Arc::new(MemoryConfigRepository::new()), store.clone(), 20).unwrap();
    let (community, member) = (unique_id(), unique_id());

    store.set_down(true);
    assert_eq!(
        router
            .dispatch(message(community, member, "lost", epoch(), veteran()))
            .await,
        Dispatch::Failed
    );
    assert!(gateway.actions().is_empty());

    store.set_down(false);
    assert_eq!(
        router
            .dispatch(message(
                community,
                member,
                "back",
                epoch() + Duration::seconds(60),
                veteran()
            ))
            .await,
        Dispatch::Handled
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_config_outage_aborts_join() {
    let configs = Arc::new(FailingConfigRepository::default());
    let (router, gateway) =
        router_over(configs.clone(), Arc::new(MemoryProgressionRepository::new()), 20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    gateway.with_community(community, "Offline", Some(unique_id()));

    configs.set_down(true);
    assert_eq!(router.dispatch(join(community, member)).await, Dispatch::Failed);
    assert!(gateway.actions().is_empty());
}

#[tokio::test]
async fn test_config_outage_still_removes_invites() {
    let configs = Arc::new(FailingConfigRepository::default());
    let (router, gateway) =
        router_over(configs.clone(), Arc::new(MemoryProgressionRepository::new()), 20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    configs
        .merge(community, &ConfigUpdate::LogChannel(Some(unique_id())))
        .await
        .unwrap();

    configs.set_down(true);
    let dispatch = router
        .dispatch(message(
            community,
            member,
            "discord.gg/abc",
            epoch(),
            Duration::hours(1),
        ))
        .await;
    assert_eq!(dispatch, Dispatch::Handled);

    let actions = gateway.actions();
    assert!(actions.iter().any(|a| matches!(a, Action::Delete { .. })));
    // The warning goes out; only the audit line needed the store
    let sends: Vec<&Action> = actions
        .iter()
        .filter(|a| matches!(a, Action::Send { .. }))
        .collect();
    assert_eq!(sends.len(), 1);
    assert_eq!(gateway.sent_to(Snowflake::new(10)).len(), 1);
}

// ============================================================================
// Pump
// ============================================================================

#[tokio::test]
async fn test_one_failure_does_not_affect_the_next_event() {
    let engine = TestEngine::with_xp(20).unwrap();
    let (community, member) = (unique_id(), unique_id());
    let a = unique_id();
    engine.gateway.with_role(a, "A", 5);
    // Member unknown to the platform: the selection fails
    let (bad, _) = selection(community, unique_id(), &[a], &[a]).unwrap();

    let (tx, rx) = mpsc::channel(4);
    let pump = tokio::spawn(EventPump::new(engine.router.clone(), 1).run(rx));
    tx.send(bad).await.unwrap();
    tx.send(message(community, member, "still here", epoch(), veteran()))
        .await
        .unwrap();
    drop(tx);

    assert_eq!(pump.await.unwrap(), 2);
    assert_eq!(engine.progressions.len(), 1);
}
