use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Wood,
    Food,
}

/// Town-wide stock shared by every agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub wood: f64,
    pub food: f64,
    pub houses: u32,
}

impl ResourcePool {
    pub fn new(wood: f64, food: f64, houses: u32) -> Self {
        let mut pool = Self { wood, food, houses };
        pool.clamp_non_negative();
        pool
    }

    pub fn amount(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Food => self.food,
        }
    }

    /// Removes `amount` when the stock covers it. Leaves the pool untouched
    /// and returns false otherwise.
    pub fn try_consume(&mut self, resource: Resource, amount: f64) -> bool {
        let stock = self.slot(resource);
        if amount < 0.0 || *stock < amount {
            return false;
        }
        *stock -= amount;
        true
    }

    pub fn add(&mut self, resource: Resource, amount: f64) {
        let stock = self.slot(resource);
        *stock = (*stock + amount).max(0.0);
    }

    pub fn add_house(&mut self) {
        self.houses += 1;
    }

    /// Daily upkeep. Returns the food actually removed.
    pub fn apply_daily_food_consumption(&mut self, population: usize, per_agent: f64) -> f64 {
        let before = self.food;
        self.food -= population as f64 * per_agent;
        self.clamp_non_negative();
        before - self.food
    }

    pub fn clamp_non_negative(&mut self) {
        self.wood = self.wood.max(0.0);
        self.food = self.food.max(0.0);
    }

    fn slot(&mut self, resource: Resource) -> &mut f64 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Food => &mut self.food,
        }
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new(100.0, 150.0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_is_guarded() {
        let mut pool = ResourcePool::new(3.0, 10.0, 0);

        assert!(pool.try_consume(Resource::Wood, 2.0));
        assert_eq!(pool.wood, 1.0);
        assert!(!pool.try_consume(Resource::Wood, 2.0));
        assert_eq!(pool.wood, 1.0);
        assert!(!pool.try_consume(Resource::Food, -1.0));
        assert_eq!(pool.food, 10.0);
    }

    #[test]
    fn daily_consumption_floors_at_zero() {
        let mut pool = ResourcePool::new(0.0, 15.0, 0);

        assert_eq!(pool.apply_daily_food_consumption(3, 2.0), 6.0);
        assert_eq!(pool.food, 9.0);

        assert_eq!(pool.apply_daily_food_consumption(10, 2.0), 9.0);
        assert_eq!(pool.food, 0.0);
    }

    #[test]
    fn houses_only_increment() {
        let mut pool = ResourcePool::default();
        pool.add_house();
        pool.add_house();
        assert_eq!(pool.houses, 2);
        assert_eq!(pool.amount(Resource::Wood), 100.0);
        assert_eq!(pool.amount(Resource::Food), 150.0);
    }
}
