//! Turns a provider route plan into a single Mapbox route.
//!
//! Travel segments are walked in order. Each one is decoded into shape
//! tokens, resolved to WGS84, matched against the speed zones and collected
//! into a step. An empty shape string ends assembly: the provider uses it to
//! mark a truncated route, so later segments are dropped even when they carry
//! geometry. Max speeds are collected for the whole leg, so annotation index
//! `n` is the `n`-th coordinate across all steps.

use super::coords::{CoordSystem, InternalPoint, LngLat, ShapePoint};
use super::datum::DatumShift;
use super::directions::{Annotation, Geometry, Leg, Route, Step};
use super::duration::DurationEstimate;
use super::error::RoutingError;
use super::provider::types::{RouteInfo, RoutePlanResponse, TravelSegment};
use super::service::RouteProvider;
use super::shape::decode_shape_points;
use super::speed_limit::{match_speed_limit, parse_speed_zones, MaxSpeedSequence, SpeedZone};

const WEIGHT_NAME: &str = "auto";

/// Resolves a segment's internal-unit tokens to WGS84.
pub trait CoordinateResolver {
    /// Returns one entry per token, `None` where the token has no position.
    fn resolve(&self, tokens: &[String]) -> Result<Vec<Option<LngLat>>, RoutingError>;
}

/// Resolves through the provider's conversion endpoint into GCJ02, then
/// shifts to WGS84 locally.
pub struct ProviderResolver<'a> {
    provider: &'a dyn RouteProvider,
    datum: &'a dyn DatumShift,
}

impl<'a> ProviderResolver<'a> {
    pub fn new(provider: &'a dyn RouteProvider, datum: &'a dyn DatumShift) -> Self {
        Self { provider, datum }
    }
}

impl CoordinateResolver for ProviderResolver<'_> {
    fn resolve(&self, tokens: &[String]) -> Result<Vec<Option<LngLat>>, RoutingError> {
        let converted = self
            .provider
            .convert_coordinates(tokens, CoordSystem::Internal, CoordSystem::Gcj02)?;
        Ok(converted
            .iter()
            .map(|pair| {
                let (lng, lat) = parse_converted(pair)?;
                let (lng, lat) = self.datum.to_wgs84(lng, lat);
                Some(LngLat::new(lng, lat))
            })
            .collect())
    }
}

fn parse_converted(pair: &[String; 2]) -> Option<(f64, f64)> {
    if pair[0].is_empty() || pair[1].is_empty() {
        return None;
    }
    match (pair[0].trim().parse::<f64>(), pair[1].trim().parse::<f64>()) {
        (Ok(lng), Ok(lat)) => Some((lng, lat)),
        _ => {
            log::debug!("Skipping unparseable converted coordinate [{}, {}]", pair[0], pair[1]);
            None
        }
    }
}

/// Converts the first route of `plan`.
///
/// Fails with `NoRoute` when the plan has no routes or its first route has no
/// travel segments, and with `ApiError` when that is accompanied by a provider
/// error code.
pub fn assemble_route(
    plan: &RoutePlanResponse,
    resolver: &dyn CoordinateResolver,
) -> Result<Route, RoutingError> {
    let Some(info) = plan.route_info.first() else {
        if plan.error_code != 0 {
            return Err(RoutingError::ApiError {
                code: plan.error_code,
                message: plan.error_message.clone(),
            });
        }
        return Err(RoutingError::NoRoute("provider returned zero routes".to_string()));
    };
    if info.travel_desc.is_empty() {
        return Err(RoutingError::NoRoute(
            "first route has no travel segments".to_string(),
        ));
    }

    let mut assembly = LegAssembly::new(info);
    for (i, segment) in info.travel_desc.iter().enumerate() {
        if segment.shapepoint.is_empty() {
            log::debug!(
                "Segment {} of {} has no shape points, route truncated",
                i,
                info.travel_desc.len()
            );
            break;
        }
        assembly.add_segment(segment, resolver)?;
    }
    Ok(assembly.finish())
}

struct LegAssembly {
    zones: Vec<SpeedZone>,
    total_distance: f64,
    total_time: f64,
    steps: Vec<Step>,
    max_speeds: MaxSpeedSequence,
}

impl LegAssembly {
    fn new(info: &RouteInfo) -> Self {
        Self {
            zones: parse_speed_zones(&info.uid_info),
            total_distance: info.total_distance as f64,
            total_time: info.total_time as f64,
            steps: Vec::new(),
            max_speeds: MaxSpeedSequence::new(),
        }
    }

    fn add_segment(
        &mut self,
        segment: &TravelSegment,
        resolver: &dyn CoordinateResolver,
    ) -> Result<(), RoutingError> {
        let tokens = decode_shape_points(InternalPoint::new(segment.x, segment.y), &segment.shapepoint);
        let distance = match segment.part_distance {
            0 => self.total_distance,
            d => d as f64,
        };
        let mut duration = DurationEstimate::new(distance, self.total_time);
        let mut coordinates = Vec::with_capacity(tokens.len());

        // skipped positions still consume their token index
        for (i, position) in resolver.resolve(&tokens)?.into_iter().enumerate() {
            let Some(position) = position else {
                continue;
            };
            coordinates.push(position.as_array());

            let point = tokens
                .get(i)
                .map(|t| ShapePoint::parse_or_origin(t))
                .unwrap_or_default();
            let speed = match_speed_limit(point, &self.zones);
            let speed = self.max_speeds.push(speed as f64);
            duration.observe(speed);
        }

        if coordinates.is_empty() {
            log::debug!("Segment resolved to no coordinates, no step emitted");
            return Ok(());
        }
        self.steps.push(Step {
            geometry: Geometry::line_string(coordinates),
            distance,
            banner_instructions: Vec::new(),
            duration: duration.seconds(),
            duration_typical: duration.seconds(),
        });
        Ok(())
    }

    fn finish(self) -> Route {
        let route_geometry: Vec<[f64; 2]> = self
            .steps
            .iter()
            .flat_map(|s| s.geometry.coordinates.iter().copied())
            .collect();
        let leg = Leg {
            annotation: Annotation {
                maxspeed: self.max_speeds.into_annotation(),
            },
            weight_typical: self.total_time,
            duration_typical: self.total_time,
            steps: self.steps,
            distance: self.total_distance,
            duration: self.total_time,
            ..Default::default()
        };
        Route {
            weight_typical: self.total_time,
            duration_typical: self.total_time,
            weight_name: WEIGHT_NAME.to_string(),
            weight: self.total_time,
            duration: self.total_time,
            distance: self.total_distance,
            legs: vec![leg],
            geometry: Geometry::line_string(route_geometry),
        }
    }
}
