//! The four control rules.
//!
//! Every rule except [`manual`] keeps the solar pump off whenever the pool
//! pump is (or is about to be) off, and forces it off when a temperature
//! reading is missing.

use super::{Command, Decision, RuleContext, SwitchReason};

/// Solar off if it is currently on, otherwise leave it.
fn solar_off_if_on(ctx: &RuleContext, reason: SwitchReason) -> Option<Command> {
    ctx.solar_pump_on.then_some(Command::off(reason))
}

/// Timer window drives the pool pump; temperatures drive solar with a
/// hysteresis band between the on- and off-thresholds.
pub fn auto(ctx: &RuleContext) -> Decision {
    let timer_active = ctx.window.contains(ctx.now);
    let pool = Some(Command {
        on: timer_active,
        reason: SwitchReason::TimerWindow,
    });

    if !timer_active {
        return Decision {
            pool,
            solar: solar_off_if_on(ctx, SwitchReason::PoolPumpOff),
        };
    }

    let (Some(pool_temp), Some(solar_temp)) = (ctx.pool_temp, ctx.solar_temp) else {
        return Decision {
            pool,
            solar: solar_off_if_on(ctx, SwitchReason::SensorUnavailable),
        };
    };

    let t = &ctx.thresholds;
    let hyst = t.hysteresis_k;

    let solar = if ctx.solar_pump_on {
        if solar_temp < t.solar_min_temp_c - hyst {
            Some(Command::off(SwitchReason::SolarBelowMinimum))
        } else if pool_temp >= t.pool_max_temp_c + hyst {
            Some(Command::off(SwitchReason::PoolAtMaximum))
        } else if pool_temp >= solar_temp + hyst {
            Some(Command::off(SwitchReason::PoolReachedSolar))
        } else {
            None
        }
    } else if pool_temp < t.pool_max_temp_c
        && pool_temp < solar_temp
        && solar_temp >= t.solar_min_temp_c
    {
        Some(Command::on(SwitchReason::SolarGain))
    } else {
        None
    };

    Decision { pool, solar }
}

/// Operator switches the pumps directly; the rule issues nothing.
pub fn manual(_ctx: &RuleContext) -> Decision {
    Decision::NONE
}

/// Timer window drives the pool pump; solar is never turned on.
pub fn timer(ctx: &RuleContext) -> Decision {
    Decision {
        pool: Some(Command {
            on: ctx.window.contains(ctx.now),
            reason: SwitchReason::TimerWindow,
        }),
        solar: solar_off_if_on(ctx, SwitchReason::TimerModeNoSolar),
    }
}

/// Pool pump is left to the operator; solar runs whenever the collector
/// is warmer than the pool and the pool is below its maximum plus
/// hysteresis.
pub fn boost(ctx: &RuleContext) -> Decision {
    if !ctx.pool_pump_on {
        return Decision {
            pool: None,
            solar: solar_off_if_on(ctx, SwitchReason::PoolPumpOff),
        };
    }

    let (Some(pool_temp), Some(solar_temp)) = (ctx.pool_temp, ctx.solar_temp) else {
        return Decision {
            pool: None,
            solar: solar_off_if_on(ctx, SwitchReason::SensorUnavailable),
        };
    };

    let t = &ctx.thresholds;
    let below_limit = pool_temp < t.pool_max_temp_c + t.hysteresis_k;
    let gain = solar_temp > pool_temp;

    let solar = match (below_limit && gain, ctx.solar_pump_on) {
        (true, false) => Some(Command::on(SwitchReason::SolarGain)),
        (false, true) if !below_limit => Some(Command::off(SwitchReason::PoolAtMaximum)),
        (false, true) => Some(Command::off(SwitchReason::PoolReachedSolar)),
        _ => None,
    };

    Decision { pool: None, solar }
}
