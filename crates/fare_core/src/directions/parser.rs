use super::error::DirectionsError;
use super::response::DirectionsResponse;
use super::RouteLeg;

pub(super) fn parse_directions_response(
    resp: DirectionsResponse,
) -> Result<RouteLeg, DirectionsError> {
    if let Some(status) = resp.status.as_deref() {
        if status != "OK" {
            return Err(DirectionsError::Api(status.to_string()));
        }
    }

    let route = resp
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::Format("response contained no routes".to_string()))?;
    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::Format("first route contained no legs".to_string()))?;

    Ok(RouteLeg {
        duration_secs: leg.duration.value,
        distance_m: leg.distance.value,
    })
}
