//! Facility types and the registry that owns every facility in the tower.

use serde::{Deserialize, Serialize};

use super::people::NeedKind;

/// Functional category of a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityKind {
    Office,
    Restaurant,
    Arcade,
    Theater,
    Hotel,
    RetailShop,
    FlagshipStore,
    // Building management
    Lobby,
    Elevator,
    Management,
}

impl FacilityKind {
    /// Staff a facility of this kind needs to be fully operational
    pub fn required_employees(&self) -> u32 {
        match self {
            FacilityKind::Office => 4,
            FacilityKind::Restaurant => 3,
            FacilityKind::Hotel => 3,
            FacilityKind::RetailShop => 2,
            _ => 0,
        }
    }

    /// Visitors the facility is designed to serve at once
    pub fn capacity(&self) -> u32 {
        match self {
            FacilityKind::Office => 8,
            FacilityKind::Restaurant => 12,
            FacilityKind::Arcade => 10,
            FacilityKind::Theater => 30,
            FacilityKind::Hotel => 6,
            FacilityKind::RetailShop => 8,
            FacilityKind::FlagshipStore => 20,
            FacilityKind::Lobby => 50,
            FacilityKind::Elevator => 10,
            FacilityKind::Management => 4,
        }
    }

    /// Which need a stay here satisfies
    pub fn serves(&self) -> Option<NeedKind> {
        match self {
            FacilityKind::Restaurant => Some(NeedKind::Hunger),
            FacilityKind::Arcade | FacilityKind::Theater => Some(NeedKind::Entertainment),
            FacilityKind::Hotel => Some(NeedKind::Comfort),
            FacilityKind::RetailShop | FacilityKind::FlagshipStore => Some(NeedKind::Shopping),
            _ => None,
        }
    }

    /// Facility kinds that can satisfy a need. Multiple entries are equally good.
    pub fn serving(need: NeedKind) -> &'static [FacilityKind] {
        match need {
            NeedKind::Hunger => &[FacilityKind::Restaurant],
            NeedKind::Entertainment => &[FacilityKind::Arcade, FacilityKind::Theater],
            NeedKind::Comfort => &[FacilityKind::Hotel],
            NeedKind::Shopping => &[FacilityKind::RetailShop, FacilityKind::FlagshipStore],
        }
    }

    pub fn is_retail(&self) -> bool {
        matches!(self, FacilityKind::RetailShop | FacilityKind::FlagshipStore)
    }

    /// Kinds a freshly spawned visitor may head to
    pub fn is_spawn_destination(&self) -> bool {
        matches!(
            self,
            FacilityKind::RetailShop
                | FacilityKind::Restaurant
                | FacilityKind::Arcade
                | FacilityKind::Theater
                | FacilityKind::FlagshipStore
        )
    }

    /// Job this facility hires for, if any
    pub fn job_posting(&self) -> Option<JobPosting> {
        match self {
            FacilityKind::Office => Some(JobPosting::new("Office Worker", 9, 17)),
            FacilityKind::RetailShop => Some(JobPosting::new("Shop Clerk", 10, 19)),
            FacilityKind::Restaurant => Some(JobPosting::new("Restaurant Staff", 11, 22)),
            FacilityKind::Hotel => Some(JobPosting::new("Hotel Staff", 8, 20)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FacilityKind::Office => "Office",
            FacilityKind::Restaurant => "Restaurant",
            FacilityKind::Arcade => "Arcade",
            FacilityKind::Theater => "Theater",
            FacilityKind::Hotel => "Hotel",
            FacilityKind::RetailShop => "Retail Shop",
            FacilityKind::FlagshipStore => "Flagship Store",
            FacilityKind::Lobby => "Lobby",
            FacilityKind::Elevator => "Elevator",
            FacilityKind::Management => "Management",
        }
    }
}

/// Title and hours of a job a facility offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPosting {
    pub title: &'static str,
    pub shift_start_hour: u32,
    pub shift_end_hour: u32,
}

impl JobPosting {
    pub const fn new(title: &'static str, shift_start_hour: u32, shift_end_hour: u32) -> Self {
        Self {
            title,
            shift_start_hour,
            shift_end_hour,
        }
    }
}

/// A fixed building unit spanning `width` columns on one floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub kind: FacilityKind,
    pub floor: i32,
    pub column: i32,
    pub width: i32,
    pub capacity: u32,
    /// Actors currently interacting inside
    pub occupancy: u32,
    /// Employees assigned here who are on shift
    pub current_staff: u32,
    pub job_openings: u32,
}

impl Facility {
    pub fn new(kind: FacilityKind, floor: i32, column: i32, width: i32) -> Self {
        Self {
            kind,
            floor,
            column,
            width: width.max(1),
            capacity: kind.capacity(),
            occupancy: 0,
            current_staff: 0,
            job_openings: 0,
        }
    }

    /// Column at the middle of the footprint - where actors are sent
    pub fn center_column(&self) -> f32 {
        self.column as f32 + self.width as f32 / 2.0
    }

    /// True if the spot lies on this floor within [column, column + width)
    pub fn contains(&self, floor: i32, column: f32) -> bool {
        floor == self.floor
            && column >= self.column as f32
            && column < (self.column + self.width) as f32
    }
}

/// Stable handle to a registered facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacilityId(pub u32);

/// Every facility in the tower, kept in registration order.
/// Registration order is also lookup priority: "first match" always means
/// the earliest registered facility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityRegistry {
    facilities: Vec<(FacilityId, Facility)>,
    next_id: u32,
}

impl FacilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, facility: Facility) -> FacilityId {
        let id = FacilityId(self.next_id);
        self.next_id += 1;
        self.facilities.push((id, facility));
        id
    }

    pub fn get(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities
            .iter()
            .find(|(fid, _)| *fid == id)
            .map(|(_, f)| f)
    }

    pub fn get_mut(&mut self, id: FacilityId) -> Option<&mut Facility> {
        self.facilities
            .iter_mut()
            .find(|(fid, _)| *fid == id)
            .map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacilityId, &Facility)> {
        self.facilities.iter().map(|(id, f)| (*id, f))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FacilityId, &mut Facility)> {
        self.facilities.iter_mut().map(|(id, f)| (*id, f))
    }

    /// First registered facility of the given kind
    pub fn first_of_kind(&self, kind: FacilityKind) -> Option<(FacilityId, &Facility)> {
        self.iter().find(|(_, f)| f.kind == kind)
    }

    /// Hit-test: every facility covering the spot, in priority order
    pub fn facilities_at(&self, floor: i32, column: f32) -> impl Iterator<Item = (FacilityId, &Facility)> {
        self.iter().filter(move |(_, f)| f.contains(floor, column))
    }

    pub fn any_openings(&self) -> bool {
        self.facilities.iter().any(|(_, f)| f.job_openings > 0)
    }

    pub fn total_openings(&self) -> u32 {
        self.facilities.iter().map(|(_, f)| f.job_openings).sum()
    }

    /// Facilities a new visitor may be sent to on arrival
    pub fn spawn_destinations(&self) -> Vec<FacilityId> {
        self.iter()
            .filter(|(_, f)| f.kind.is_spawn_destination())
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_footprint() {
        let shop = Facility::new(FacilityKind::RetailShop, 2, 10, 4);
        assert_eq!(shop.center_column(), 12.0);
        assert!(shop.contains(2, 10.0));
        assert!(shop.contains(2, 13.9));
        assert!(!shop.contains(2, 14.0));
        assert!(!shop.contains(1, 12.0));
    }

    #[test]
    fn test_registry_preserves_registration_order() {
        let mut registry = FacilityRegistry::new();
        let first = registry.register(Facility::new(FacilityKind::Restaurant, 5, 0, 4));
        let _second = registry.register(Facility::new(FacilityKind::Restaurant, 1, 0, 4));

        let (id, found) = registry.first_of_kind(FacilityKind::Restaurant).unwrap();
        assert_eq!(id, first);
        assert_eq!(found.floor, 5);
    }

    #[test]
    fn test_hit_test_priority() {
        let mut registry = FacilityRegistry::new();
        let lobby = registry.register(Facility::new(FacilityKind::Lobby, 0, 0, 20));
        let shop = registry.register(Facility::new(FacilityKind::RetailShop, 0, 5, 4));

        let hits: Vec<FacilityId> = registry.facilities_at(0, 6.0).map(|(id, _)| id).collect();
        assert_eq!(hits, vec![lobby, shop]);
        assert_eq!(registry.facilities_at(1, 6.0).count(), 0);
    }

    #[test]
    fn test_job_postings() {
        let office = FacilityKind::Office.job_posting().unwrap();
        assert_eq!(office.title, "Office Worker");
        assert_eq!((office.shift_start_hour, office.shift_end_hour), (9, 17));
        assert!(FacilityKind::Theater.job_posting().is_none());
        assert!(FacilityKind::FlagshipStore.job_posting().is_none());
    }
}
