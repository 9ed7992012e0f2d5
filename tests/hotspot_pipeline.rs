use {
    chrono::{DateTime, TimeZone, Utc},
    hotspot_estimator::{
        HotspotMap, ReportKind, ReportRepository, SqliteDocumentStore, ZoneDisplayMode,
        analysis::{DateWindow, MapFilter, ZoneKind},
        data::{ReportFlag, import_export},
    },
    serde_json::json,
    std::sync::Arc,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 10, 18, 0, 0).unwrap()
}

async fn repository() -> ReportRepository {
    let store = SqliteDocumentStore::in_memory().await.unwrap();
    let export = json!({
        "adminusers": {
            "a1": { "email": "ops@rescue.ke", "role": "organization", "orgrole": "Moderator" }
        },
        "users": {
            "u1": { "county": "Nakuru" },
            "u2": { "county": "Nakuru" },
            "u3": { "county": "Kiambu" }
        },
        "missingPersonsReports": {
            "m1": {
                "missingPersonName": "Kamau",
                "dateOfDisappearance": "2024-07-10T12:00",
                "createdAt": "2024-07-10T13:00:00Z",
                "location": "Nakuru-Nairobi highway",
                "terrain": ["Mountain/Hill"],
                "flags": ["injured"],
                "geopoint": { "_latitude": -0.3031, "_longitude": 36.08 }
            },
            "m2": {
                "missingPersonName": "Undated",
                "position": [-0.1, 36.0]
            }
        },
        "dangerReports": {
            "d1": {
                "category": "Landslide",
                "createdAt": { "_seconds": 1720612800, "_nanoseconds": 0 },
                "position": "lat: -0.5, lon: 36.3"
            }
        }
    });
    import_export(&store, &export).await.unwrap();
    ReportRepository::new(Arc::new(store))
}

#[tokio::test]
async fn test_staff_sees_travel_zones_for_imported_report() {
    let repo = repository().await;
    let ops = repo.resolve_session(Some("ops@rescue.ke")).await.unwrap();

    let mut map = HotspotMap::new(repo.hotspots(&ops, now()).await.unwrap());
    let ids: Vec<&str> = map.hotspots().iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["m1"]);

    assert!(map.show("m1", ZoneDisplayMode::Travel));
    let layer = map.active_layer().unwrap();
    assert_eq!(layer.zones[0].kind, ZoneKind::TravelVehicle);
    // 6h on a highway, capped at 200 km
    assert_eq!(layer.zones[0].radius_meters.value(), 200_000.0);
    // 6h injured at 0.75 km/h on difficult ground: 4.5 km * 0.6
    assert!((layer.zones[1].radius_meters.value() - 2_700.0).abs() < 1e-6);

    map.select("m1");
    assert!(map.active_layer().is_none());
}

#[tokio::test]
async fn test_citizen_submission_alerts_county_and_moderation_hides_it() {
    let repo = repository().await;
    let citizen = repo.resolve_session(Some("walker@mail.ke")).await.unwrap();
    assert!(repo.hotspots(&citizen, now()).await.is_err());

    let out = repo
        .submit_report(
            &citizen,
            ReportKind::Danger,
            json!({ "category": "Flooding", "county": "Nakuru", "position": [-0.28, 36.07] }),
            now(),
        )
        .await
        .unwrap();
    assert_eq!(out.notifications, 2);

    let recent = MapFilter {
        kind: Some(ReportKind::Danger),
        window: Some(DateWindow::Last24h),
    };
    let shown: Vec<String> = repo
        .community_map(recent, now())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(shown, vec!["d1".to_string(), out.id.clone()]);

    let ops = repo.resolve_session(Some("ops@rescue.ke")).await.unwrap();
    repo.set_flag(&ops, ReportKind::Danger, &out.id, ReportFlag::Rejected, true)
        .await
        .unwrap();
    let shown = repo.community_map(recent, now()).await.unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "d1");
}
