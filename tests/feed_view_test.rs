use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use salaboard::db::{RoomStore, SqliteRoomStore};
use salaboard::feed::{ChangeFeed, RoomEvent};
use salaboard::models::{RoomDraft, RoomPatch, Turno, Weekday};
use salaboard::services::RoomListView;

async fn setup_store() -> Arc<dyn RoomStore> {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Arc::new(SqliteRoomStore::new(pool))
}

fn draft(sala_aula: &str) -> RoomDraft {
    RoomDraft {
        unidade: "Campus Central".to_string(),
        curso: "Sistemas de Informação".to_string(),
        periodo: "3".to_string(),
        disciplina: "Banco de Dados".to_string(),
        docente: "Prof. Silva".to_string(),
        sala_aula: sala_aula.to_string(),
        turno: Turno::Noturno,
        dias_semana: vec![Weekday::Segunda],
        status: true,
    }
}

#[tokio::test]
async fn test_write_echo_keeps_view_current() {
    let store = setup_store().await;
    let feed = ChangeFeed::new();

    // Seed first, then attach the subscription, as a mounting view would.
    let mut view = RoomListView::new();
    view.seed(store.list().await.expect("Failed to seed"));
    let view = Arc::new(Mutex::new(view));

    let mut subscription = feed.subscribe();
    let view_task = {
        let view = view.clone();
        tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                view.lock().await.apply(event);
            }
        })
    };

    // Create: the write does not touch the view directly, the echo does.
    let room = store.create(draft("Lab 204")).await.expect("create failed");
    feed.publish(RoomEvent::Insert(room.clone()));
    tokio::time::sleep(Duration::from_millis(50)).await;
    {
        let view = view.lock().await;
        assert_eq!(view.rooms().len(), 1);
        assert_eq!(view.rooms()[0].id, room.id);
    }

    // Status toggle echoes a partial patch.
    let updated_at = store
        .update_status(&room.id, false)
        .await
        .expect("status update failed");
    feed.publish(RoomEvent::Update(RoomPatch::status_only(
        &room.id, false, updated_at,
    )));
    tokio::time::sleep(Duration::from_millis(50)).await;
    {
        let view = view.lock().await;
        assert!(!view.rooms()[0].status);
        // The patch left the rest of the record alone.
        assert_eq!(view.rooms()[0].sala_aula, "Lab 204");
    }

    // Delete echoes as well.
    store.delete(&room.id).await.expect("delete failed");
    feed.publish(RoomEvent::Delete {
        id: room.id.clone(),
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    {
        let view = view.lock().await;
        assert!(view.rooms().is_empty());
    }

    view_task.abort();
}

#[tokio::test]
async fn test_create_then_toggle_end_to_end() {
    let store = setup_store().await;

    let room = store.create(draft("Lab 204")).await.expect("create failed");
    assert!(!room.id.is_empty());
    assert_eq!(room.created_at, room.updated_at);
    assert!(room.status);

    tokio::time::sleep(Duration::from_millis(5)).await;
    store
        .update_status(&room.id, false)
        .await
        .expect("status update failed");

    let rooms = store.list().await.expect("list failed");
    assert_eq!(rooms.len(), 1);
    assert!(!rooms[0].status);
    assert!(rooms[0].updated_at > room.updated_at);
}

#[tokio::test]
async fn test_room_status_shadow_follows_toggle() {
    let store = setup_store().await;
    let feed = ChangeFeed::new();

    let room = store.create(draft("Lab 204")).await.expect("create failed");
    let other = store.create(draft("Sala 101")).await.expect("create failed");

    let mut shadow = feed.subscribe_room(&room.id, room.status);
    assert!(shadow.status());

    // A toggle on some other room must not move the shadow.
    let other_stamp = store
        .update_status(&other.id, false)
        .await
        .expect("status update failed");
    feed.publish(RoomEvent::Update(RoomPatch::status_only(
        &other.id,
        false,
        other_stamp,
    )));

    let stamp = store
        .update_status(&room.id, false)
        .await
        .expect("status update failed");
    feed.publish(RoomEvent::Update(RoomPatch::status_only(
        &room.id, false, stamp,
    )));

    assert_eq!(shadow.changed().await, Some(false));
    assert!(!shadow.status());
}

#[tokio::test]
async fn test_view_seeded_from_store_keeps_newest_first() {
    let store = setup_store().await;

    store.create(draft("Sala 101")).await.expect("create failed");
    tokio::time::sleep(Duration::from_millis(5)).await;
    store.create(draft("Sala 102")).await.expect("create failed");

    let mut view = RoomListView::new();
    view.seed(store.list().await.expect("list failed"));

    let salas: Vec<&str> = view
        .rooms()
        .iter()
        .map(|r| r.sala_aula.as_str())
        .collect();
    assert_eq!(salas, vec!["Sala 102", "Sala 101"]);
}
