//! Regression statistics.
//!
//! Pearson correlation, the slope's standard error, and a two-sided p-value
//! for the slope from the Student-t distribution with n-2 degrees of freedom.
//! The p-value needs the regularized incomplete beta function, evaluated with
//! the standard Lentz continued-fraction expansion; no external stats crate
//! is involved.

/// Diagnostics of a simple linear regression `y ~ intercept + slope * x`.
#[derive(Debug, Clone, Copy)]
pub struct RegressionStats {
    pub r_value: f64,
    pub p_value: f64,
    pub std_err: f64,
}

/// Compute r, the two-sided slope p-value, and the slope standard error for
/// an already-solved simple regression.
///
/// Callers guarantee `xs.len() == ys.len() >= 2`.
pub fn regression_stats(xs: &[f64], ys: &[f64], slope: f64, intercept: f64) -> RegressionStats {
    let n = xs.len();
    debug_assert_eq!(n, ys.len());
    debug_assert!(n >= 2);

    let nf = n as f64;
    let x_mean = xs.iter().sum::<f64>() / nf;
    let y_mean = ys.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let r_value = if sxx > 0.0 && syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    let df = nf - 2.0;

    let mut ss_res = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let r = y - (intercept + slope * x);
        ss_res += r * r;
    }

    let std_err = if df > 0.0 && sxx > 0.0 {
        (ss_res / df / sxx).sqrt()
    } else {
        0.0
    };

    let p_value = if df > 0.0 {
        // Guard the denominator so |r| = 1 yields t -> inf and p -> 0
        // instead of 0/0.
        const TINY: f64 = 1e-20;
        let t = r_value * (df / ((1.0 - r_value + TINY) * (1.0 + r_value + TINY))).sqrt();
        two_sided_t_p(t, df)
    } else {
        // Two points define the line exactly; the test is vacuous.
        1.0
    };

    RegressionStats {
        r_value,
        p_value,
        std_err,
    }
}

/// Two-sided p-value for a t statistic with `df` degrees of freedom:
/// `P(|T| >= |t|) = I_{df/(df + t^2)}(df/2, 1/2)`.
pub fn two_sided_t_p(t: f64, df: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    betai(0.5 * df, 0.5, x).clamp(0.0, 1.0)
}

/// Regularized incomplete beta function `I_x(a, b)`.
fn betai(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    // Use the expansion that converges fastest on each side of the split.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * betacf(a, b, x) / a
    } else {
        1.0 - front * betacf(b, a, 1.0 - x) / b
    }
}

/// Continued-fraction expansion for the incomplete beta (modified Lentz).
fn betacf(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 3e-14;
    const FPMIN: f64 = 1e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < EPS {
            break;
        }
    }

    h
}

/// Natural log of the gamma function (Lanczos approximation, |err| < 2e-10).
fn ln_gamma(x: f64) -> f64 {
    const COEF: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];

    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut y = x;
    let mut ser = 1.000_000_000_190_015;
    for c in COEF {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}
