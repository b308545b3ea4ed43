use center_popup::prelude::*;
use std::time::Duration;

/// Integration tests driving the controller through a real map and its events
#[cfg(test)]
mod center_popup_tests {
    use super::*;

    const TITLE: &str = "title-text";
    const DESCRIPTION: &str = "description-text";

    struct Scene {
        map: Map,
        markers: SharedLayerGroup,
        calls: SharedLayerGroup,
        panel: MemoryPanel,
    }

    /// 800x600 map with A projecting to (405, 352) and B to (200, 200)
    fn scene() -> Scene {
        let map = MapBuilder::new()
            .with_center_and_zoom(LatLng::new(48.1374, 11.5755), 14.0)
            .with_size(Point::new(800.0, 600.0))
            .build()
            .unwrap();

        let a = map.viewport().container_point_to_lat_lng(&Point::new(405.0, 352.0));
        let b = map.viewport().container_point_to_lat_lng(&Point::new(200.0, 200.0));

        let markers = LayerGroup::new("markers")
            .with_layer(Marker::circle("a", a))
            .with_layer(Marker::circle("b", b))
            .shared();
        let calls = LayerGroup::new("calls")
            .with_layer(Marker::circle("call-a", a).with_data(MarkerData::new("A", "Alpha call")))
            .with_layer(Marker::circle("call-b", b).with_data(MarkerData::new("B", "Bravo call")))
            .shared();

        Scene {
            map,
            markers,
            calls,
            panel: MemoryPanel::with_elements([TITLE, DESCRIPTION]),
        }
    }

    fn controller(scene: &Scene) -> CenterPopupController {
        CenterPopupController::builder()
            .markers(scene.markers.clone())
            .calls(scene.calls.clone())
            .panel(scene.panel.clone())
            .build()
            .unwrap()
    }

    fn open_calls(scene: &Scene) -> Vec<String> {
        scene.calls.read().unwrap().open_popups()
    }

    #[test]
    fn test_projection_places_markers_where_expected() {
        let scene = scene();
        let markers = scene.markers.read().unwrap();
        let a = markers.get("a").unwrap().position().unwrap();
        let point = scene.map.lat_lng_to_container_point(&a);
        assert!((point.x - 405.0).abs() < 1e-6);
        assert!((point.y - 352.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_plugin_opens_nearest_popup_after_debounce() {
        let mut scene = scene();
        let plugin = controller(&scene);
        scene.map.add_plugin(Box::new(plugin)).unwrap();

        let center = scene.map.center();
        scene.map.set_view(center, 14.0).unwrap();
        scene.map.update(Instant::now()).unwrap();
        assert!(open_calls(&scene).is_empty());

        tokio::time::sleep(Duration::from_millis(15)).await;
        scene.map.update(Instant::now()).unwrap();

        assert_eq!(open_calls(&scene), vec!["call-a"]);
        assert_eq!(scene.panel.text(TITLE).as_deref(), Some("A"));
        assert_eq!(scene.panel.text(DESCRIPTION).as_deref(), Some("Alpha call"));
    }

    #[tokio::test]
    async fn test_burst_of_moves_recomputes_once() {
        let mut scene = scene();
        let mut controller = controller(&scene);
        controller.attach(&mut scene.map).unwrap();
        assert!(controller.attach(&mut scene.map).is_err());

        for _ in 0..10 {
            scene.map.pan_by(Point::new(1.0, 0.0));
            scene.map.process_events();
        }
        // undo the drift so A is back on its point
        scene.map.pan_by(Point::new(-10.0, 0.0));
        scene.map.process_events();
        assert!(controller.is_pending());

        tokio::time::sleep(Duration::from_millis(15)).await;
        let outcome = controller.poll(&scene.map, Instant::now()).unwrap();
        assert!(outcome.is_some());
        assert!(controller
            .poll(&scene.map, Instant::now())
            .unwrap()
            .is_none());
        assert_eq!(controller.recompute_count(), 1);
        assert_eq!(controller.current_popup(), Some("call-a"));
    }

    #[test]
    fn test_update_follows_the_host_clock() {
        let mut scene = scene();
        let plugin = controller(&scene);
        scene.map.add_plugin(Box::new(plugin)).unwrap();

        // a simulated clock an hour ahead of the wall clock
        let t0 = Instant::now() + Duration::from_secs(3600);
        scene.map.pan_by(Point::new(4.0, 0.0));
        scene.map.pan_by(Point::new(-4.0, 0.0));
        scene.map.update(t0).unwrap();

        scene.map.update(t0 + Duration::from_millis(1)).unwrap();
        assert!(open_calls(&scene).is_empty());

        scene.map.update(t0 + Duration::from_millis(100)).unwrap();
        assert_eq!(open_calls(&scene), vec!["call-a"]);
        assert_eq!(scene.panel.text(TITLE).as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_suppressed_map_never_recomputes() {
        let mut scene = scene();
        let mut controller = controller(&scene);
        controller.attach(&mut scene.map).unwrap();
        controller.set_suppressed(true);

        for _ in 0..5 {
            scene.map.pan_by(Point::new(0.0, 3.0));
            scene.map.process_events();
        }
        tokio::time::sleep(Duration::from_millis(15)).await;

        assert!(controller
            .poll(&scene.map, Instant::now())
            .unwrap()
            .is_none());
        assert_eq!(controller.recompute_count(), 0);
        assert!(open_calls(&scene).is_empty());
    }

    #[tokio::test]
    async fn test_panning_away_closes_marker_popups() {
        let mut scene = scene();
        scene
            .markers
            .write()
            .unwrap()
            .each_layer_mut(|marker| marker.open_popup());
        let plugin = controller(&scene);
        scene.map.add_plugin(Box::new(plugin)).unwrap();

        scene.map.pan_by(Point::new(3000.0, 0.0));
        scene.map.update(Instant::now()).unwrap();
        tokio::time::sleep(Duration::from_millis(15)).await;
        scene.map.update(Instant::now()).unwrap();

        assert!(scene.markers.read().unwrap().open_popups().is_empty());
        assert!(open_calls(&scene).is_empty());
    }

    #[tokio::test]
    async fn test_removed_plugin_stops_listening() {
        let mut scene = scene();
        let plugin = controller(&scene);
        scene.map.add_plugin(Box::new(plugin)).unwrap();
        assert_eq!(scene.map.plugin_names(), vec!["center-popup"]);
        assert_eq!(scene.map.listener_count("move"), 1);

        let removed = scene.map.remove_plugin("center-popup").unwrap();
        assert_eq!(removed.name(), "center-popup");
        assert_eq!(scene.map.listener_count("move"), 0);
        let center = scene.map.center();
        scene.map.set_view(center, 14.0).unwrap();
        scene.map.update(Instant::now()).unwrap();
        tokio::time::sleep(Duration::from_millis(15)).await;
        scene.map.update(Instant::now()).unwrap();

        assert!(open_calls(&scene).is_empty());
        assert_eq!(scene.panel.text(TITLE).as_deref(), Some(""));
    }

    #[test]
    fn test_resize_keeps_anchor_relative_to_center() {
        let mut scene = scene();
        let mut controller = controller(&scene);

        // the center stays put, so A keeps its (5, 2) offset from the anchor
        scene.map.set_size(Point::new(200.0, 100.0));
        let outcome = controller.recompute(&scene.map).unwrap();
        match outcome {
            Recompute::InRange { closest, .. } => {
                assert_eq!(closest.id, "a");
                assert!((closest.point.x - 105.0).abs() < 1e-6);
                assert!((closest.distance - 29f64.sqrt()).abs() < 1e-6);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(open_calls(&scene), vec!["call-a"]);
    }

    #[test]
    fn test_config_from_json_drives_tolerance() {
        let scene = scene();
        let config = CenterPopupConfig::from_json(r#"{"tolerance": 2.0}"#).unwrap();
        let mut controller = CenterPopupController::builder()
            .config(config)
            .markers(scene.markers.clone())
            .calls(scene.calls.clone())
            .panel(scene.panel.clone())
            .build()
            .unwrap();

        // A sits ~5.4px from the anchor, outside a 2px tolerance
        let outcome = controller.recompute(&scene.map).unwrap();
        assert!(matches!(outcome, Recompute::OutOfRange { .. }));
        assert!(open_calls(&scene).is_empty());
    }
}
