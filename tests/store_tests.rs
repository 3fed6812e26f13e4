mod common;

use chrono::NaiveDate;
use octofit_backend::db::{LeaderboardFilter, Page};
use octofit_backend::errors::{AppError, NON_FIELD_ERRORS};
use octofit_backend::models::{NewActivity, NewLeaderboardEntry, NewTeam, NewUser, NewWorkout};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn run(user_id: i64) -> NewActivity {
    NewActivity {
        user_id,
        activity_type: "run".to_string(),
        duration: 30,
        calories: 200,
        date: date(2024, 1, 1),
    }
}

#[tokio::test]
async fn test_create_user_and_duplicate_username() {
    let store = common::test_store().await;

    let user = store
        .create_user(NewUser::new("testuser", "test@example.com"))
        .await
        .unwrap();
    let fetched = store.get_user(user.id).await.unwrap();
    assert_eq!(fetched.username, "testuser");
    assert!(fetched.is_active);

    let err = store
        .create_user(NewUser::new("testuser", "other@example.com"))
        .await
        .unwrap_err();
    match err {
        AppError::DuplicateKey { field, .. } => assert_eq!(field, "username"),
        other => panic!("expected DuplicateKey, got {:?}", other),
    }
    assert_eq!(store.count("users").await.unwrap(), 1);
}

#[tokio::test]
async fn test_passwords_are_hashed() {
    let store = common::test_store().await;

    let user = store
        .create_user(NewUser::new("alice", "").with_password("password123"))
        .await
        .unwrap();
    assert_ne!(user.password, "password123");
    assert!(store.check_password("alice", "password123").await.unwrap());
    assert!(!store.check_password("alice", "password124").await.unwrap());

    let nopass = store.create_user(NewUser::new("bob", "")).await.unwrap();
    assert!(!nopass.has_usable_password());
    assert!(!store.check_password("bob", "").await.unwrap());
}

#[tokio::test]
async fn test_update_user_keeps_hash_without_password() {
    let store = common::test_store().await;
    let user = store
        .create_user(NewUser::new("alice", "a@example.com").with_password("password123"))
        .await
        .unwrap();

    let updated = store
        .update_user(user.id, NewUser::new("alice2", "a2@example.com"))
        .await
        .unwrap();
    assert_eq!(updated.username, "alice2");
    assert_eq!(updated.password, user.password);

    let err = store
        .update_user(999, NewUser::new("ghost", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_membership_is_a_set() {
    let store = common::test_store().await;
    let user = store.create_user(NewUser::new("testuser2", "")).await.unwrap();
    let team = store.create_team(NewTeam::new("Team A")).await.unwrap();

    store.add_team_member(team.id, user.id).await.unwrap();
    let team = store.add_team_member(team.id, user.id).await.unwrap();
    assert_eq!(team.members, vec![user.id]);

    let members = store.team_members(team.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].username, "testuser2");
}

#[tokio::test]
async fn test_add_member_to_missing_team_or_user() {
    let store = common::test_store().await;
    let user = store.create_user(NewUser::new("alice", "")).await.unwrap();
    let team = store.create_team(NewTeam::new("Alpha")).await.unwrap();

    let err = store.add_team_member(42, user.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = store.add_team_member(team.id, 42).await.unwrap_err();
    match err {
        AppError::ReferentialIntegrity { field, .. } => assert_eq!(field, "user"),
        other => panic!("expected ReferentialIntegrity, got {:?}", other),
    }
}

#[tokio::test]
async fn test_team_with_unknown_member_is_rolled_back() {
    let store = common::test_store().await;

    let err = store
        .create_team(NewTeam {
            members: vec![77],
            ..NewTeam::new("Ghosts")
        })
        .await
        .unwrap_err();
    match err {
        AppError::ReferentialIntegrity { field, .. } => assert_eq!(field, "members"),
        other => panic!("expected ReferentialIntegrity, got {:?}", other),
    }
    assert_eq!(store.count("teams").await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_team_replaces_members() {
    let store = common::test_store().await;
    let a = store.create_user(NewUser::new("a", "")).await.unwrap();
    let b = store.create_user(NewUser::new("b", "")).await.unwrap();
    let team = store
        .create_team(NewTeam {
            members: vec![a.id],
            ..NewTeam::new("Alpha")
        })
        .await
        .unwrap();

    let team = store
        .update_team(
            team.id,
            NewTeam {
                members: vec![b.id],
                ..NewTeam::new("Alpha Prime")
            },
        )
        .await
        .unwrap();
    assert_eq!(team.name, "Alpha Prime");
    assert_eq!(team.members, vec![b.id]);

    store.remove_team_member(team.id, b.id).await.unwrap();
    assert!(store.get_team(team.id).await.unwrap().members.is_empty());
    assert!(matches!(
        store.remove_team_member(team.id, b.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_activity_requires_existing_user() {
    let store = common::test_store().await;

    let err = store.create_activity(run(12345)).await.unwrap_err();
    match err {
        AppError::ReferentialIntegrity { field, .. } => assert_eq!(field, "user"),
        other => panic!("expected ReferentialIntegrity, got {:?}", other),
    }
    assert_eq!(store.count("activities").await.unwrap(), 0);
}

#[tokio::test]
async fn test_activity_crud_and_filter() {
    let store = common::test_store().await;
    let alice = store.create_user(NewUser::new("alice", "")).await.unwrap();
    let bob = store.create_user(NewUser::new("bob", "")).await.unwrap();

    let activity = store.create_activity(run(alice.id)).await.unwrap();
    store.create_activity(run(bob.id)).await.unwrap();

    assert_eq!(store.get_activity(activity.id).await.unwrap(), activity);

    let only_alice = store
        .list_activities(Some(alice.id), Page::default())
        .await
        .unwrap();
    assert_eq!(only_alice, vec![activity.clone()]);

    let updated = store
        .update_activity(
            activity.id,
            NewActivity {
                duration: 45,
                ..run(alice.id)
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.duration, 45);

    store.delete_activity(activity.id).await.unwrap();
    assert!(matches!(
        store.get_activity(activity.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let store = common::test_store().await;
    let user = store.create_user(NewUser::new("alice", "")).await.unwrap();
    let team = store
        .create_team(NewTeam {
            members: vec![user.id],
            ..NewTeam::new("Alpha")
        })
        .await
        .unwrap();
    let workout = store
        .create_workout(NewWorkout {
            name: "Cardio".to_string(),
            difficulty: "Easy".to_string(),
            suggested_for: vec![user.id],
            ..NewWorkout::default()
        })
        .await
        .unwrap();
    store.create_activity(run(user.id)).await.unwrap();

    store.delete_user(user.id).await.unwrap();

    assert_eq!(store.count("activities").await.unwrap(), 0);
    assert!(store.get_team(team.id).await.unwrap().members.is_empty());
    assert!(store.get_workout(workout.id).await.unwrap().suggested_for.is_empty());
    assert!(matches!(
        store.delete_user(user.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_workout_suggestions() {
    let store = common::test_store().await;
    let alice = store.create_user(NewUser::new("alice", "")).await.unwrap();
    let carol = store.create_user(NewUser::new("carol", "")).await.unwrap();
    let workout = store
        .create_workout(NewWorkout {
            name: "Cardio".to_string(),
            description: "Cardio workout".to_string(),
            difficulty: "Easy".to_string(),
            suggested_for: vec![carol.id, alice.id, carol.id],
        })
        .await
        .unwrap();
    assert_eq!(workout.suggested_for, vec![alice.id, carol.id]);

    let workout = store.add_workout_suggestion(workout.id, alice.id).await.unwrap();
    assert_eq!(workout.suggested_for.len(), 2);

    store.remove_workout_suggestion(workout.id, carol.id).await.unwrap();
    let users = store.workout_suggested_users(workout.id).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, alice.id);
}

#[tokio::test]
async fn test_leaderboard_unique_week_and_ordering() {
    let store = common::test_store().await;
    let alpha = store.create_team(NewTeam::new("Team B")).await.unwrap();
    let beta = store.create_team(NewTeam::new("Team C")).await.unwrap();
    let week = date(2024, 1, 7);

    store
        .create_leaderboard_entry(NewLeaderboardEntry { team_id: alpha.id, score: 100, week })
        .await
        .unwrap();
    store
        .create_leaderboard_entry(NewLeaderboardEntry { team_id: beta.id, score: 300, week })
        .await
        .unwrap();

    let err = store
        .create_leaderboard_entry(NewLeaderboardEntry { team_id: alpha.id, score: 5, week })
        .await
        .unwrap_err();
    match err {
        AppError::DuplicateKey { field, .. } => assert_eq!(field, NON_FIELD_ERRORS),
        other => panic!("expected DuplicateKey, got {:?}", other),
    }

    let ranked = store
        .list_leaderboard(LeaderboardFilter::default(), Page::default())
        .await
        .unwrap();
    let scores: Vec<i64> = ranked.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![300, 100]);

    let filtered = store
        .list_leaderboard(
            LeaderboardFilter { team_id: Some(alpha.id), week: Some(week) },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].team_id, alpha.id);
}

#[tokio::test]
async fn test_leaderboard_requires_team_and_cascades() {
    let store = common::test_store().await;

    let err = store
        .create_leaderboard_entry(NewLeaderboardEntry {
            team_id: 8,
            score: 1,
            week: date(2024, 1, 7),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialIntegrity { field: "team", .. }));

    let team = store.create_team(NewTeam::new("Alpha")).await.unwrap();
    store
        .create_leaderboard_entry(NewLeaderboardEntry {
            team_id: team.id,
            score: 1,
            week: date(2024, 1, 7),
        })
        .await
        .unwrap();
    store.delete_team(team.id).await.unwrap();
    assert_eq!(store.count("leaderboard").await.unwrap(), 0);
}

#[tokio::test]
async fn test_pagination_and_flush() {
    let store = common::test_store().await;
    for name in ["a", "b", "c", "d"] {
        store.create_user(NewUser::new(name, "")).await.unwrap();
    }

    let page = store
        .list_users(Page { limit: Some(2), offset: Some(1) })
        .await
        .unwrap();
    let names: Vec<&str> = page.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);

    store.flush().await.unwrap();
    assert_eq!(store.count("users").await.unwrap(), 0);
    let fresh = store.create_user(NewUser::new("a", "")).await.unwrap();
    assert_eq!(fresh.id, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_membership_writes_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::file_store(dir.path()).await;

    let mut user_ids = Vec::new();
    for i in 0..10 {
        let user = store
            .create_user(NewUser::new(format!("runner{}", i), ""))
            .await
            .unwrap();
        user_ids.push(user.id);
    }
    let alpha = store.create_team(NewTeam::new("Team Alpha")).await.unwrap();
    let beta = store.create_team(NewTeam::new("Team Beta")).await.unwrap();
    let workout = store
        .create_workout(NewWorkout {
            name: "Cardio Blast".to_string(),
            difficulty: "Medium".to_string(),
            ..NewWorkout::default()
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for &user_id in &user_ids {
        for team_id in [alpha.id, beta.id] {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add_team_member(team_id, user_id).await.map(|_| ())
            }));
        }
        let store = store.clone();
        let workout_id = workout.id;
        handles.push(tokio::spawn(async move {
            store.add_workout_suggestion(workout_id, user_id).await.map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get_team(alpha.id).await.unwrap().members, user_ids);
    assert_eq!(store.get_team(beta.id).await.unwrap().members, user_ids);
    assert_eq!(store.get_workout(workout.id).await.unwrap().suggested_for, user_ids);

    let mut handles = Vec::new();
    for &user_id in &user_ids {
        let store = store.clone();
        let team_id = alpha.id;
        handles.push(tokio::spawn(async move {
            store.remove_team_member(team_id, user_id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert!(store.get_team(alpha.id).await.unwrap().members.is_empty());
    assert_eq!(store.count("team_members").await.unwrap(), 10);
}
