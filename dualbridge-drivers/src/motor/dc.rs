//! DC motor driver for one H-bridge channel
//!
//! This driver provides:
//! - PWM duty control on the enable line (0-100%)
//! - Direction control through the two bridge inputs
//! - Brake (fast stop) and coast (free-running stop)
//! - Poll-driven timed runs, timed waits and 1% acceleration ramps
//!
//! # Usage
//!
//! The driver never blocks. Timed operations are polled from the
//! application loop until they report completion:
//!
//! ```ignore
//! let mut motor = HBridgeMotor::new(config, enable_pwm, in1, in2, clock)?;
//!
//! loop {
//!     match state {
//!         0 => if motor.run_for(30, 1000) { state = 1 },
//!         _ => if motor.wait_for(500) { motor.reverse_rotation(); state = 0 },
//!     }
//!     // ... other work, no sleeping ...
//! }
//! ```
//!
//! Direction changes release the old input before asserting the new one, so
//! the bridge never sees both inputs high outside of an explicit brake.

use dualbridge_core::config::MotorConfig;
use dualbridge_core::timing::{Countdown, Ramp, RampParams, RampPoll, TimerPoll};
use dualbridge_core::traits::{BridgeState, DcMotorDriver, Direction, MotorError, MotorStatus};
use dualbridge_core::Speed;
use dualbridge_hal::{MonotonicClock, OutputPin, PwmOutput};

/// H-bridge DC motor
///
/// Owns the enable PWM channel, both direction inputs and a clock handle.
/// Pass a shared reference as the clock to drive several motors from one
/// time base.
pub struct HBridgeMotor<EN, FWD, REV, CLK> {
    config: MotorConfig,
    /// PWM channel on the bridge enable input
    enable: EN,
    /// Input asserted for clockwise rotation
    forward: FWD,
    /// Input asserted for counter-clockwise rotation
    reverse: REV,
    clock: CLK,
    /// Intended rotation sense
    direction: Direction,
    /// Last commanded speed
    speed: Speed,
    /// Current input encoding
    bridge: BridgeState,
    run_timer: Countdown,
    wait_timer: Countdown,
    ramp: Ramp,
}

impl<EN, FWD, REV, CLK> HBridgeMotor<EN, FWD, REV, CLK>
where
    EN: PwmOutput,
    FWD: OutputPin,
    REV: OutputPin,
    CLK: MonotonicClock,
{
    /// Create a motor, configure its PWM frequency and start it stopped,
    /// set for clockwise rotation
    pub fn new(
        config: MotorConfig,
        mut enable: EN,
        forward: FWD,
        reverse: REV,
        clock: CLK,
    ) -> Result<Self, MotorError> {
        config.validate()?;

        if let Err(e) = enable.set_frequency(config.pwm_frequency_hz) {
            warn!(
                "motor {}: PWM rejected {} Hz",
                config.label.as_str(),
                config.pwm_frequency_hz
            );
            return Err(e.into());
        }
        enable.set_off();

        let mut motor = Self {
            config,
            enable,
            forward,
            reverse,
            clock,
            direction: Direction::Clockwise,
            speed: Speed::STOP,
            bridge: BridgeState::Coast,
            run_timer: Countdown::new(),
            wait_timer: Countdown::new(),
            ramp: Ramp::new(),
        };
        motor.set_inputs(BridgeState::Coast);
        motor.set_inputs(BridgeState::Forward);

        debug!(
            "motor {}: ready at {} Hz, max duty {}",
            motor.label(),
            motor.config.pwm_frequency_hz,
            motor.enable.max_duty()
        );

        Ok(motor)
    }

    /// Release the peripherals
    pub fn into_parts(self) -> (EN, FWD, REV, CLK) {
        (self.enable, self.forward, self.reverse, self.clock)
    }

    /// Clamp a raw speed into range, reporting the correction
    fn clamp_speed(&self, raw: i32) -> Speed {
        let speed = Speed::saturating_from(raw);
        if speed.percent() as i32 != raw {
            debug!(
                "motor {}: speed {} clamped to {}",
                self.label(),
                raw,
                speed.percent()
            );
        }
        speed
    }

    /// Drive the bridge inputs, releasing before asserting
    fn set_inputs(&mut self, state: BridgeState) {
        let (fwd, rev) = state.input_levels();

        if !fwd {
            self.forward.set_low();
        }
        if !rev {
            self.reverse.set_low();
        }
        if fwd {
            self.forward.set_high();
        }
        if rev {
            self.reverse.set_high();
        }

        self.bridge = state;
    }

    /// Write the enable duty for `speed`
    fn write_speed(&mut self, speed: Speed) {
        let duty = speed.to_duty(self.enable.max_duty());
        self.enable.set_duty(duty);
        self.speed = speed;
    }

    /// Run at an already clamped speed, leaving brake/coast if needed
    fn drive(&mut self, speed: Speed) {
        let wanted = BridgeState::for_direction(self.direction);
        if self.bridge != wanted {
            self.set_inputs(wanted);
        }
        self.write_speed(speed);
    }
}

impl<EN, FWD, REV, CLK> DcMotorDriver for HBridgeMotor<EN, FWD, REV, CLK>
where
    EN: PwmOutput,
    FWD: OutputPin,
    REV: OutputPin,
    CLK: MonotonicClock,
{
    fn label(&self) -> &str {
        self.config.label.as_str()
    }

    fn rotation(&mut self, direction: Direction) {
        self.ramp.release();
        let was_driving = self.bridge.is_driving();

        self.direction = direction;
        self.set_inputs(BridgeState::for_direction(direction));

        // Coming out of brake the enable line is still fully on
        if !was_driving {
            let duty = self.speed.to_duty(self.enable.max_duty());
            if self.enable.duty() != duty {
                self.enable.set_duty(duty);
            }
        }

        trace!("motor {}: rotation {}", self.label(), direction);
    }

    fn brake(&mut self) {
        self.ramp.release();
        self.set_inputs(BridgeState::Brake);
        self.enable.set_full();
        self.speed = Speed::STOP;

        trace!("motor {}: brake", self.label());
    }

    fn coast(&mut self) {
        self.ramp.release();
        self.enable.set_off();
        self.set_inputs(BridgeState::Coast);
        self.speed = Speed::STOP;

        trace!("motor {}: coast", self.label());
    }

    fn run(&mut self, speed: i32) {
        self.ramp.release();
        let speed = self.clamp_speed(speed);
        self.drive(speed);
    }

    fn run_for(&mut self, speed: i32, ms_to_run: u32) -> bool {
        self.ramp.release();
        let now = self.clock.now_ms();

        match self.run_timer.poll(now, ms_to_run) {
            TimerPoll::Armed { deadline } => {
                self.run(speed);
                debug!(
                    "motor {}: run at {}% until {} ms",
                    self.label(),
                    self.speed.percent(),
                    deadline
                );
                false
            }
            TimerPoll::Pending => false,
            TimerPoll::Elapsed => {
                // A brake or coast issued mid-run already stopped the motor
                if self.bridge.is_driving() {
                    self.write_speed(Speed::STOP);
                }
                debug!("motor {}: timed run complete at {} ms", self.label(), now);
                true
            }
        }
    }

    fn wait_for(&mut self, ms_wait: u32) -> bool {
        self.ramp.release();
        let now = self.clock.now_ms();

        match self.wait_timer.poll(now, ms_wait) {
            TimerPoll::Armed { deadline } => {
                trace!("motor {}: wait until {} ms", self.label(), deadline);
                false
            }
            TimerPoll::Pending => false,
            TimerPoll::Elapsed => true,
        }
    }

    fn accelerate(&mut self, speed_from: i32, speed_to: i32, ms_wait: u32) -> bool {
        let params = RampParams {
            from: self.clamp_speed(speed_from),
            to: self.clamp_speed(speed_to),
            step_ms: ms_wait,
        };
        let now = self.clock.now_ms();

        let poll = self.ramp.poll(params, now, self.speed);
        if let Some(speed) = poll.speed() {
            self.drive(speed);
        }

        match poll {
            RampPoll::Start(from) => debug!(
                "motor {}: ramp {}% -> {}% in {} steps of {} ms",
                self.label(),
                from.percent(),
                params.to.percent(),
                params.step_count(),
                ms_wait
            ),
            RampPoll::Done(to) => {
                debug!("motor {}: ramp reached {}%", self.label(), to.percent())
            }
            _ => {}
        }

        poll.is_complete()
    }

    fn cancel(&mut self) {
        self.run_timer.cancel();
        self.wait_timer.cancel();
        self.ramp.cancel();

        debug!("motor {}: timers cancelled", self.label());
    }

    fn ramp_step_ms(&self) -> u32 {
        self.config.ramp_step_ms
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }

    fn get_speed(&self) -> Speed {
        self.speed
    }

    fn bridge_state(&self) -> BridgeState {
        self.bridge
    }

    fn is_run_active(&self) -> bool {
        self.run_timer.is_active()
    }

    fn is_wait_active(&self) -> bool {
        self.wait_timer.is_active()
    }

    fn is_ramping(&self) -> bool {
        self.ramp.is_active()
    }

    fn status(&self) -> MotorStatus {
        MotorStatus {
            direction: self.direction,
            speed: self.speed,
            bridge: self.bridge,
            duty: self.enable.duty(),
            run_active: self.run_timer.is_active(),
            wait_active: self.wait_timer.is_active(),
            ramping: self.ramp.is_active(),
        }
    }
}
