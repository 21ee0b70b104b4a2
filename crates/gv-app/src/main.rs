//! Demo entry point: builds a small stack of geo layers and renders them
//! through the adapter registry into a recording backend.

use anyhow::{anyhow, Result};
use tracing::info;

use geo_types::Coord;
use gv_core::{CoordSystem, Crs, Dataset, GridCoord, GridData, MapFeature, ScatterData, TextAnnotation};
use gv_element::{AnyGeoElement, Feature, GeoOptions, GeoPayload, Image, Points, Text};
use gv_plot::{
    compute_ranges, plot_for, Axis, ElementInput, PlotOptions, RecordingBackend, Ticks, BACKEND,
};

/// A synthetic global temperature field on a coarse geodetic grid.
fn temperature_grid() -> GridData {
    let lons: Vec<f64> = (0..36).map(|i| -180.0 + 10.0 * i as f64).collect();
    let lats: Vec<f64> = (0..18).map(|j| -85.0 + 10.0 * j as f64).collect();
    let values: Vec<f64> = lats
        .iter()
        .flat_map(|lat| {
            lons.iter()
                .map(move |lon| 288.0 - 0.4 * lat.abs() + 2.0 * lon.to_radians().sin())
        })
        .collect();
    GridData::new(
        "temperature",
        GridCoord::with_unit("longitude", "degrees_east", lons),
        GridCoord::with_unit("latitude", "degrees_north", lats),
        values,
        Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
    )
}

fn city_points() -> Result<AnyGeoElement> {
    let scatter = ScatterData::new(
        vec![-0.13, 2.35, 13.4, 139.69],
        vec![51.51, 48.86, 52.52, 35.69],
        None,
    );
    let points = Points::new(
        GeoPayload::Dataset(Dataset::from_scatter(scatter)),
        GeoOptions::with_crs(Crs::plate_carree()),
    )?;
    Ok(points.into())
}

fn coastline_stub() -> Result<AnyGeoElement> {
    // A single schematic coastline segment stands in for real geometry.
    let segment = vec![
        Coord { x: -10.0, y: 35.0 },
        Coord { x: 0.0, y: 50.0 },
        Coord { x: 10.0, y: 55.0 },
    ];
    let feature = MapFeature::new("coastline", Crs::plate_carree(), vec![segment]);
    let feature = Feature::new(GeoPayload::Feature(feature), GeoOptions::default())?;
    Ok(feature.into())
}

fn render_layer(axis: &mut Axis, element: &AnyGeoElement, opts: PlotOptions) -> Result<()> {
    let mut plot = plot_for(BACKEND, element.kind(), ElementInput::Single(element), opts)
        .ok_or_else(|| anyhow!("no adapter registered for {:?}", element.kind()))?;
    let ranges = compute_ranges(element);
    plot.render(axis, element, &ranges)?;
    info!(kind = ?element.kind(), "rendered layer");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let image: AnyGeoElement =
        Image::new(GeoPayload::Grid(temperature_grid()), GeoOptions::default())?.into();
    let label: AnyGeoElement = Text::new(
        GeoPayload::Annotation(TextAnnotation::new(-0.13, 51.51, "London")),
        GeoOptions::with_crs(Crs::plate_carree()),
    )?
    .into();
    let points = city_points()?;
    let coast = coastline_stub()?;

    let (backend, log) = RecordingBackend::new();
    let mut axis = Axis::new(Crs::plate_carree(), Box::new(backend));

    render_layer(&mut axis, &image, PlotOptions::default())?;
    render_layer(
        &mut axis,
        &coast,
        PlotOptions {
            zorder: 1,
            ..PlotOptions::default()
        },
    )?;
    render_layer(
        &mut axis,
        &points,
        PlotOptions {
            zorder: 2,
            xticks: Some(Ticks::Count(5)),
            yticks: Some(Ticks::Count(5)),
            ..PlotOptions::default()
        },
    )?;
    render_layer(
        &mut axis,
        &label,
        PlotOptions {
            zorder: 3,
            ..PlotOptions::default()
        },
    )?;

    println!("rendered 4 layers, {} draw calls:", log.calls().len());
    for call in log.calls() {
        println!("  {call:?}");
    }
    Ok(())
}
