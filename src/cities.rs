//! Static city table served by `/cities` and used as a green-space fallback.

use serde::Serialize;

use crate::models::Coordinate;

#[derive(Clone, Debug, Serialize)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub green_space_percent: f64,
}

impl City {
    fn new(name: &'static str, lat: f64, lon: f64, green_space_percent: f64) -> Self {
        Self {
            name,
            lat,
            lon,
            green_space_percent,
        }
    }
}

pub fn all() -> Vec<City> {
    vec![
        City::new("Delhi", 28.7041, 77.1025, 12.0),
        City::new("Mumbai", 19.0760, 72.8777, 8.0),
        City::new("Chennai", 13.0827, 80.2707, 15.0),
        City::new("Kolkata", 22.5726, 88.3639, 7.0),
        City::new("Bengaluru", 12.9716, 77.5946, 18.0),
        City::new("Hyderabad", 17.3850, 78.4867, 16.0),
        City::new("Ahmedabad", 23.0225, 72.5714, 10.0),
        City::new("Pune", 18.5204, 73.8567, 20.0),
        City::new("Jaipur", 26.9124, 75.7873, 14.0),
        City::new("Lucknow", 26.8467, 80.9462, 11.0),
        City::new("Kanpur", 26.4499, 80.3319, 9.0),
        City::new("Nagpur", 21.1458, 79.0882, 13.0),
        City::new("Indore", 22.7196, 75.8577, 17.0),
        City::new("Thane", 19.2183, 72.9781, 12.0),
        City::new("Bhopal", 23.2599, 77.4126, 19.0),
        City::new("Visakhapatnam", 17.6868, 83.2185, 15.0),
        City::new("Vadodara", 22.3072, 73.1812, 14.0),
        City::new("Coimbatore", 11.0168, 76.9558, 18.0),
        City::new("Patna", 25.5941, 85.1376, 8.0),
        City::new("Ghaziabad", 28.6692, 77.4538, 10.0),
        City::new("Ludhiana", 30.9010, 75.8573, 12.0),
        City::new("Agra", 27.1767, 78.0081, 9.0),
        City::new("Nashik", 19.9975, 73.7898, 16.0),
        City::new("Faridabad", 28.4089, 77.3178, 11.0),
        City::new("Meerut", 28.9845, 77.7064, 10.0),
        City::new("Rajkot", 22.3039, 70.8022, 14.0),
        City::new("Kalyan", 19.2433, 73.1308, 13.0),
        City::new("Vasai-Virar", 19.3910, 72.8397, 12.0),
        City::new("Varanasi", 25.3176, 82.9739, 8.0),
        City::new("Srinagar", 34.0837, 74.7973, 20.0),
        City::new("Aurangabad", 19.8762, 75.3433, 15.0),
        City::new("Dhanbad", 23.7957, 86.4304, 10.0),
        City::new("Amritsar", 31.6340, 74.8723, 18.0),
        City::new("Navi Mumbai", 19.0330, 73.0297, 12.0),
        City::new("Allahabad", 25.4358, 81.8463, 9.0),
        City::new("Ranchi", 23.3441, 85.3096, 14.0),
        City::new("Howrah", 22.5958, 88.2636, 10.0),
        City::new("Jabalpur", 23.1815, 79.9864, 13.0),
        City::new("Gwalior", 26.2183, 78.1828, 15.0),
        City::new("Bhubaneswar", 20.2961, 85.8245, 17.0),
        City::new("Moradabad", 28.8388, 78.7730, 10.0),
        City::new("Jodhpur", 26.2389, 73.0243, 12.0),
        City::new("Raipur", 21.2514, 81.6296, 16.0),
        City::new("Kota", 25.2138, 75.8648, 13.0),
        City::new("Guwahati", 26.1445, 91.7362, 14.0),
        City::new("Chandigarh", 30.7333, 76.7794, 18.0),
        City::new("Mysore", 12.2958, 76.6394, 17.0),
        City::new("Tiruchirappalli", 10.7905, 78.7047, 15.0),
        City::new("Bareilly", 28.3670, 79.4304, 11.0),
        City::new("Aligarh", 27.8974, 78.0880, 10.0),
        City::new("Tirupati", 13.6288, 79.4192, 16.0),
    ]
}

/// Exact-coordinate lookup. The frontend echoes `/cities` entries back
/// verbatim, so float equality is deliberate here.
pub fn find_at(coord: Coordinate) -> Option<City> {
    all()
        .into_iter()
        .find(|c| c.lat == coord.lat && c.lon == coord.lon)
}
