//! Arithmetic provider.
//!
//! Binary operations read `a` and `b`, unary ones read `x`. Operands default
//! to zero when absent or not numeric. Every result except `mod` is tagged
//! `float`; integral floats still render as JSON integers.


use upfn_protocol::{
    Evaluated, Invocation, Operation, OperationError, OperationResult, OperationTable,
};

/// Operations served by the `math` provider.
pub const TABLE: OperationTable = OperationTable::new(
    "math",
    &[
        Operation::new("add", add),
        Operation::new("sub", sub),
        Operation::new("mul", mul),
        Operation::new("div", div),
        Operation::new("mod", modulo),
        Operation::new("pow", pow),
        Operation::new("sqrt", sqrt),
        Operation::new("abs", abs),
        Operation::new("min", min),
        Operation::new("max", max),
        Operation::new("ceil", ceil),
        Operation::new("floor", floor),
        Operation::new("round", round),
    ],
);

fn operands(call: &Invocation<'_>) -> (f64, f64) {
    let params = call.params();
    (params.get_f64("a", 0.0), params.get_f64("b", 0.0))
}

fn unary(call: &Invocation<'_>, apply: fn(f64) -> f64) -> OperationResult {
    Evaluated::float(apply(call.params().get_f64("x", 0.0)))
}

#[expect(clippy::float_arithmetic, reason = "addition is the operation")]
fn add(call: &Invocation<'_>) -> OperationResult {
    let (a, b) = operands(call);
    Evaluated::float(a + b)
}

#[expect(clippy::float_arithmetic, reason = "subtraction is the operation")]
fn sub(call: &Invocation<'_>) -> OperationResult {
    let (a, b) = operands(call);
    Evaluated::float(a - b)
}

#[expect(clippy::float_arithmetic, reason = "multiplication is the operation")]
fn mul(call: &Invocation<'_>) -> OperationResult {
    let (a, b) = operands(call);
    Evaluated::float(a * b)
}

#[expect(clippy::float_arithmetic, reason = "division is the operation")]
fn div(call: &Invocation<'_>) -> OperationResult {
    let (a, b) = operands(call);
    if b == 0.0 {
        return Err(OperationError::invalid("division by zero"));
    }
    Evaluated::float(a / b)
}

/// Truncated remainder; the sign follows the dividend.
fn modulo(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let a = params.get_i64("a", 0);
    let b = params.get_i64("b", 0);
    if b == 0 {
        return Err(OperationError::invalid("modulo by zero"));
    }
    Ok(Evaluated::int(a.wrapping_rem(b)))
}

fn pow(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let base = params.get_f64("base", 0.0);
    let exponent = params.get_f64("exponent", 0.0);
    Evaluated::float(base.powf(exponent))
}

fn sqrt(call: &Invocation<'_>) -> OperationResult {
    let x = call.params().get_f64("x", 0.0);
    if x < 0.0 {
        return Err(OperationError::invalid(
            "cannot take square root of negative number",
        ));
    }
    Evaluated::float(x.sqrt())
}

fn abs(call: &Invocation<'_>) -> OperationResult {
    unary(call, f64::abs)
}

fn ceil(call: &Invocation<'_>) -> OperationResult {
    unary(call, f64::ceil)
}

fn floor(call: &Invocation<'_>) -> OperationResult {
    unary(call, f64::floor)
}

fn round(call: &Invocation<'_>) -> OperationResult {
    unary(call, f64::round)
}

/// Folds `values` with `pick`, counting non-numeric elements as zero.
fn extreme(call: &Invocation<'_>, pick: fn(f64, f64) -> f64) -> OperationResult {
    let values = call.params().non_empty_list("values")?;
    let best = values
        .iter()
        .map(|value| value.as_f64().unwrap_or(0.0))
        .reduce(pick)
        .ok_or_else(|| OperationError::shape("values", "non-empty list"))?;
    Evaluated::float(best)
}

fn min(call: &Invocation<'_>) -> OperationResult {
    extreme(call, f64::min)
}

fn max(call: &Invocation<'_>) -> OperationResult {
    extreme(call, f64::max)
}
