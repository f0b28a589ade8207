use std::cell::RefCell;
use std::rc::Rc;
use serde::{Deserialize, Serialize};

/// Value (usually exploration rate) changing while agent learns.
pub trait Schedule{
    /// Current value.
    fn value(&self) -> f64;
    /// Advances schedule by one step and returns new value.
    fn step(&mut self) -> f64;
}

/// Schedule that never changes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub struct ConstantSchedule{
    value: f64,
}

impl ConstantSchedule{
    pub fn new(value: f64) -> Self{
        Self{value}
    }
}

impl Schedule for ConstantSchedule{
    fn value(&self) -> f64 {
        self.value
    }

    fn step(&mut self) -> f64 {
        self.value
    }
}

/// Linear interpolation from `init_value` to `final_value` in `num_steps` steps,
/// constant afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub struct LinearSchedule{
    init_value: f64,
    final_value: f64,
    num_steps: u64,
    value: f64,
    steps_taken: u64,
}

impl LinearSchedule{
    pub fn new(init_value: f64, final_value: f64, num_steps: u64) -> Self{
        Self{init_value, final_value, num_steps, value: init_value, steps_taken: 0}
    }

    pub fn init_value(&self) -> f64{
        self.init_value
    }

    pub fn final_value(&self) -> f64{
        self.final_value
    }

    pub fn num_steps(&self) -> u64{
        self.num_steps
    }

    pub fn steps_taken(&self) -> u64{
        self.steps_taken
    }
}

impl Schedule for LinearSchedule{
    fn value(&self) -> f64 {
        self.value
    }

    fn step(&mut self) -> f64 {
        self.steps_taken += 1;
        if self.num_steps == 0{
            self.value = self.final_value;
            return self.value
        }
        let increment = (self.final_value - self.init_value) / self.num_steps as f64;
        self.value += increment;
        self.value = if self.init_value >= self.final_value{
            self.value.max(self.final_value)
        } else {
            self.value.min(self.final_value)
        };
        self.value
    }
}

/// Schedules available to learning agents.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub enum EpsilonSchedule{
    Constant(ConstantSchedule),
    Linear(LinearSchedule),
}

impl EpsilonSchedule{
    pub fn constant(value: f64) -> Self{
        Self::Constant(ConstantSchedule::new(value))
    }

    pub fn linear(init_value: f64, final_value: f64, num_steps: u64) -> Self{
        Self::Linear(LinearSchedule::new(init_value, final_value, num_steps))
    }

    /// Number of steps taken, constant schedule does not count them.
    pub fn steps_taken(&self) -> u64{
        match self{
            EpsilonSchedule::Constant(_) => 0,
            EpsilonSchedule::Linear(s) => s.steps_taken(),
        }
    }
}

impl Default for EpsilonSchedule{
    fn default() -> Self {
        Self::constant(0.2)
    }
}

impl Schedule for EpsilonSchedule{
    fn value(&self) -> f64 {
        match self{
            EpsilonSchedule::Constant(s) => s.value(),
            EpsilonSchedule::Linear(s) => s.value(),
        }
    }

    fn step(&mut self) -> f64 {
        match self{
            EpsilonSchedule::Constant(s) => s.step(),
            EpsilonSchedule::Linear(s) => s.step(),
        }
    }
}

/// Handle to one [`EpsilonSchedule`] advanced by every agent holding a clone of it.
///
/// Each learning step of any holder moves the schedule, so two agents sharing linear schedule
/// of `n` steps reach its final value after `n` steps in total.
#[derive(Debug, Clone)]
pub struct SharedSchedule{
    inner: Rc<RefCell<EpsilonSchedule>>,
}

impl SharedSchedule{
    pub fn new(schedule: EpsilonSchedule) -> Self{
        Self{inner: Rc::new(RefCell::new(schedule))}
    }

    /// Copy of schedule in its current position.
    pub fn snapshot(&self) -> EpsilonSchedule{
        *self.inner.borrow()
    }

    /// Whether both handles point to the same schedule.
    pub fn is_shared_with(&self, other: &SharedSchedule) -> bool{
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<EpsilonSchedule> for SharedSchedule{
    fn from(schedule: EpsilonSchedule) -> Self {
        Self::new(schedule)
    }
}

impl Schedule for SharedSchedule{
    fn value(&self) -> f64 {
        self.inner.borrow().value()
    }

    fn step(&mut self) -> f64 {
        self.inner.borrow_mut().step()
    }
}

#[cfg(test)]
mod tests{
    use crate::schedule::{EpsilonSchedule, LinearSchedule, Schedule, SharedSchedule};

    #[test]
    fn linear_decreases_and_clamps(){
        let mut s = LinearSchedule::new(0.5, 0.1, 4);
        assert_eq!(s.value(), 0.5);
        assert!((s.step() - 0.4).abs() < 1e-12);
        s.step();
        s.step();
        assert!((s.step() - 0.1).abs() < 1e-12);
        assert_eq!(s.step(), 0.1);
        assert_eq!(s.steps_taken(), 5);
    }

    #[test]
    fn linear_increasing_and_degenerate(){
        let mut s = LinearSchedule::new(0.0, 1.0, 2);
        s.step();
        s.step();
        assert_eq!(s.step(), 1.0);
        let mut zero = LinearSchedule::new(0.3, 0.05, 0);
        assert_eq!(zero.step(), 0.05);
    }

    #[test]
    fn constant_and_default(){
        let mut s = EpsilonSchedule::default();
        assert_eq!(s.value(), 0.2);
        assert_eq!(s.step(), 0.2);
        assert_eq!(s.steps_taken(), 0);
    }

    #[test]
    fn shared_schedule_counts_steps_of_all_holders(){
        let mut first = SharedSchedule::new(EpsilonSchedule::linear(0.5, 0.1, 4));
        let mut second = first.clone();
        assert!(first.is_shared_with(&second));
        first.step();
        second.step();
        assert!((first.value() - 0.3).abs() < 1e-12);
        first.step();
        assert!((second.step() - 0.1).abs() < 1e-12);
        assert_eq!(first.snapshot().steps_taken(), 4);
        assert!(!first.is_shared_with(&SharedSchedule::new(EpsilonSchedule::default())));
    }
}
