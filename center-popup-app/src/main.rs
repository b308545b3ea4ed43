use anyhow::Context;
use center_popup::{
    prelude::*, CenterPopupConfig, CenterPopupController, LayerGroup, Marker, MarkerData,
};
use std::time::Duration;

const STATIONS: [(&str, f64, f64, &str, &str); 4] = [
    ("ferry", 37.7955, -122.3937, "Ferry Building", "Call 1042 - noise complaint"),
    ("coit", 37.8024, -122.4058, "Coit Tower", "Call 1043 - lost visitor"),
    ("union", 37.7880, -122.4075, "Union Square", "Call 1044 - traffic"),
    ("civic", 37.7793, -122.4193, "Civic Center", "Call 1045 - welfare check"),
];

/// Map frame interval for the simulated render loop
const FRAME: Duration = Duration::from_millis(2);

/// Headless walk across a few markers, logging what the center popup does
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut markers = LayerGroup::new("markers");
    let mut calls = LayerGroup::new("calls");
    for (id, lat, lng, title, description) in STATIONS {
        let position = LatLng::new(lat, lng);
        markers.add_layer(Marker::circle(id, position));
        calls.add_layer(
            Marker::circle(format!("call-{id}"), position)
                .with_data(MarkerData::new(title, description)),
        );
    }
    let markers = markers.shared();
    let calls = calls.shared();
    let panel = MemoryPanel::with_elements(["title-text", "description-text"]);

    let controller = CenterPopupController::builder()
        .config(CenterPopupConfig::default())
        .markers(markers.clone())
        .calls(calls.clone())
        .panel(panel.clone())
        .build()
        .context("building center popup controller")?;
    let suppression = controller.suppression_handle();

    let size = Point::new(1200.0, 800.0);
    let mut map = MapBuilder::new()
        .with_center_and_zoom(LatLng::new(37.7749, -122.4194), 15.0)
        .with_size(size)
        .with_plugin(controller)
        .build()?;

    for (id, lat, lng, _, _) in STATIONS {
        // Center the map 50px north of the station so it lands on the anchor
        let station = LatLng::new(lat, lng);
        let anchor = map
            .viewport()
            .container_point_to_lat_lng(&Point::new(size.x / 2.0, size.y / 2.0 + 50.0));
        let center = map.center();
        let target = LatLng::new(
            station.lat + (center.lat - anchor.lat),
            station.lng + (center.lng - anchor.lng),
        );

        let dragging = id == "union";
        suppression.set_suppressed(dragging);
        map.set_view(target, 15.0)?;
        settle(&mut map).await?;

        let open = calls
            .read()
            .map_err(|_| anyhow::anyhow!("calls group lock poisoned"))?
            .open_popups();
        log::info!(
            "at {id:>6} (suppressed: {dragging}): open popups {open:?}, panel title {:?}",
            panel.text("title-text").unwrap_or_default()
        );
    }

    suppression.set_suppressed(false);
    map.pan_by(Point::new(2000.0, 0.0));
    settle(&mut map).await?;
    log::info!(
        "far from every station: open marker popups {:?}",
        markers
            .read()
            .map_err(|_| anyhow::anyhow!("marker group lock poisoned"))?
            .open_popups()
    );

    Ok(())
}

/// Runs map frames until the debounce delay has comfortably passed
async fn settle(map: &mut Map) -> anyhow::Result<()> {
    for _ in 0..6 {
        map.update(Instant::now())?;
        tokio::time::sleep(FRAME).await;
    }
    map.update(Instant::now())?;
    Ok(())
}
