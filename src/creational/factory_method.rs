// Factory Method: each logistics creator decides which transport it builds,
// while the delivery planning in the base trait stays the same.

use std::io;

use crate::transcript::Transcript;

// ============================================================================
// Example: Factory Method with trait objects
// ============================================================================

pub trait Transport {
    fn describe(&self) -> String;
    fn deliver(&self) -> String;
}

struct Truck;
impl Transport for Truck {
    fn describe(&self) -> String {
        "truck (road transport)".to_string()
    }
    fn deliver(&self) -> String {
        "cargo driven over land".to_string()
    }
}

struct Ship;
impl Transport for Ship {
    fn describe(&self) -> String {
        "ship (sea transport)".to_string()
    }
    fn deliver(&self) -> String {
        "cargo shipped in containers".to_string()
    }
}

struct Airplane;
impl Transport for Airplane {
    fn describe(&self) -> String {
        "airplane (air transport)".to_string()
    }
    fn deliver(&self) -> String {
        "cargo flown by air freight".to_string()
    }
}

pub trait Logistics {
    fn name(&self) -> &'static str;

    /// The factory method.
    fn create_transport(&self) -> Box<dyn Transport>;

    /// Business logic written only against `Transport`.
    fn plan_delivery(&self, out: &mut Transcript<'_>) -> io::Result<()> {
        let transport = self.create_transport();
        out.line(self.name(), transport.describe())?;
        out.line("deliver", transport.deliver())
    }
}

pub struct RoadLogistics;
impl Logistics for RoadLogistics {
    fn name(&self) -> &'static str {
        "road-logistics"
    }
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Truck)
    }
}

pub struct SeaLogistics;
impl Logistics for SeaLogistics {
    fn name(&self) -> &'static str {
        "sea-logistics"
    }
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Ship)
    }
}

pub struct AirLogistics;
impl Logistics for AirLogistics {
    fn name(&self) -> &'static str {
        "air-logistics"
    }
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Airplane)
    }
}

// ============================================================================
// Example: Factory with enums (static dispatch)
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Route {
    Road,
    Sea,
}

enum AnyTransport {
    Truck(Truck),
    Ship(Ship),
}

impl AnyTransport {
    fn for_route(route: Route) -> Self {
        match route {
            Route::Road => AnyTransport::Truck(Truck),
            Route::Sea => AnyTransport::Ship(Ship),
        }
    }

    fn describe(&self) -> String {
        match self {
            AnyTransport::Truck(t) => t.describe(),
            AnyTransport::Ship(s) => s.describe(),
        }
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let companies: Vec<Box<dyn Logistics>> = vec![
        Box::new(RoadLogistics),
        Box::new(SeaLogistics),
        Box::new(AirLogistics),
    ];
    for company in &companies {
        company.plan_delivery(out)?;
    }

    let road = RoadLogistics.create_transport().describe();
    let sea = SeaLogistics.create_transport().describe();
    out.check("products-differ", road != sea)?;

    for route in [Route::Road, Route::Sea] {
        out.line("enum-factory", AnyTransport::for_route(route).describe())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_creators_pick_products() {
        assert!(RoadLogistics.create_transport().describe().contains("truck"));
        assert!(SeaLogistics.create_transport().describe().contains("ship"));
        assert!(AirLogistics.create_transport().describe().contains("airplane"));
    }

    #[test]
    fn test_enum_factory() {
        assert!(AnyTransport::for_route(Route::Sea).describe().contains("ship"));
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("road-logistics: truck (road transport)\n"));
        assert!(text.contains("sea-logistics: ship (sea transport)\n"));
        assert!(text.contains("products-differ: true\n"));
    }
}
