// Special functions over the complex plane: gamma, digamma, the principal
// branch of the Lambert W function and zetac (Riemann zeta minus one).
//
// All of these are approximations good to roughly double precision for the
// arguments a plot will feed them. Poles are not special-cased: dividing by
// a zero of sin or a vanishing denominator yields inf/nan which is exactly
// what the colouring pipeline expects at a pole.

use std::f64::consts::PI;

use num::complex::Complex;

// Lanczos coefficients for g = 7, n = 9.
const LANCZOS_G : f64 = 7.0;
const LANCZOS : [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Gamma function, Lanczos approximation with reflection for Re z < 0.5.
pub fn gamma(z : Complex<f64>) -> Complex<f64> {
    if z.re < 0.5 {
        // Gamma(z) Gamma(1-z) = pi / sin(pi z)
        let pi_z = z * PI;
        PI / (pi_z.sin() * gamma(Complex::new(1.0, 0.0) - z))
    } else {
        let z = z - 1.0;
        let mut acc = Complex::new(LANCZOS[0], 0.0);
        for (k, c) in LANCZOS.iter().enumerate().skip(1) {
            acc += *c / (z + k as f64);
        }
        let t = z + LANCZOS_G + 0.5;
        (2.0 * PI).sqrt() * t.powc(z + 0.5) * (-t).exp() * acc
    }
}

/// Digamma function. Recurrence pushes the argument out to Re z >= 10,
/// then the asymptotic expansion in 1/z^2 finishes the job.
pub fn digamma(z : Complex<f64>) -> Complex<f64> {
    if z.re < 0.5 {
        // psi(z) = psi(1-z) - pi cot(pi z)
        let pi_z = z * PI;
        return digamma(Complex::new(1.0, 0.0) - z) - PI * pi_z.cos() / pi_z.sin();
    }
    let mut z = z;
    let mut acc = Complex::new(0.0, 0.0);
    while z.re < 10.0 {
        acc -= 1.0 / z;
        z += 1.0;
    }
    let inv = 1.0 / z;
    let inv2 = inv * inv;
    acc + z.ln()
        - 0.5 * inv
        - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 / 240.0)))
}

/// Principal branch of the Lambert W function, solving w e^w = z.
///
/// Initial guess by region (branch-point series near -1/e, log asymptote for
/// large |z|, log(1+z) otherwise), then Halley iteration.
pub fn lambertw(z : Complex<f64>) -> Complex<f64> {
    if z.re == 0.0 && z.im == 0.0 {
        return Complex::new(0.0, 0.0);
    }
    let branch_point = (-1.0f64).exp();
    let mut w = if (z + branch_point).norm() < 0.3 {
        let p = (2.0 * (std::f64::consts::E * z + 1.0)).sqrt();
        -1.0 + p - p * p / 3.0 + 11.0 * p * p * p / 72.0
    } else if z.norm() > 1.5 {
        let l = z.ln();
        l - l.ln()
    } else {
        (z + 1.0).ln()
    };
    for _ in 0..64 {
        let ew = w.exp();
        let f = w * ew - z;
        let wp1 = w + 1.0;
        let dw = f / (ew * wp1 - (w + 2.0) * f / (2.0 * wp1));
        w -= dw;
        if dw.norm() <= 1e-15 * (1.0 + w.norm()) {
            break;
        }
    }
    w
}

// Number of terms in Borwein's alternating-series acceleration.
const BORWEIN_N : usize = 32;

/// Riemann zeta. Borwein's algorithm for Re s >= 0, the functional
/// equation for the left half-plane. The pole at s = 1 falls out of the
/// 1 - 2^(1-s) denominator as an inf.
pub fn zeta(s : Complex<f64>) -> Complex<f64> {
    let one = Complex::new(1.0, 0.0);
    if s.re < 0.0 {
        // zeta(s) = 2^s pi^(s-1) sin(pi s / 2) Gamma(1-s) zeta(1-s)
        let reflected = one - s;
        return Complex::new(2.0, 0.0).powc(s)
            * Complex::new(PI, 0.0).powc(s - 1.0)
            * (s * PI / 2.0).sin()
            * gamma(reflected)
            * zeta(reflected);
    }
    let n = BORWEIN_N;
    // d_k = n * sum_{i<=k} (n+i-1)! 4^i / ((n-i)! (2i)!), built by term ratios.
    let mut d = [0.0f64; BORWEIN_N + 1];
    let mut term = 1.0 / n as f64;
    let mut partial = term;
    d[0] = n as f64 * partial;
    for i in 1..=n {
        term *= 4.0 * ((n + i - 1) as f64) * ((n - i + 1) as f64)
            / (((2 * i) as f64) * ((2 * i - 1) as f64));
        partial += term;
        d[i] = n as f64 * partial;
    }
    let mut acc = Complex::new(0.0, 0.0);
    for k in 0..n {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        acc += sign * (d[k] - d[n]) * Complex::new((k + 1) as f64, 0.0).powc(-s);
    }
    let scale = one - Complex::new(2.0, 0.0).powc(one - s);
    -acc / (d[n] * scale)
}

/// zetac(s) = zeta(s) - 1, the form the function namespace exposes.
pub fn zetac(s : Complex<f64>) -> Complex<f64> {
    zeta(s) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a : Complex<f64>, re : f64, im : f64, tol : f64) {
        assert!(
            (a.re - re).abs() < tol && (a.im - im).abs() < tol,
            "got {} expected {}+{}i",
            a,
            re,
            im
        );
    }

    #[test]
    fn gamma_at_integers_and_half() {
        close(gamma(Complex::new(1.0, 0.0)), 1.0, 0.0, 1e-12);
        close(gamma(Complex::new(5.0, 0.0)), 24.0, 0.0, 1e-10);
        close(gamma(Complex::new(0.5, 0.0)), PI.sqrt(), 0.0, 1e-12);
    }

    #[test]
    fn gamma_reflection() {
        // Gamma(-0.5) = -2 sqrt(pi)
        close(gamma(Complex::new(-0.5, 0.0)), -2.0 * PI.sqrt(), 0.0, 1e-10);
    }

    #[test]
    fn gamma_complex_argument() {
        // Gamma(1 + i), reference value from the literature
        close(
            gamma(Complex::new(1.0, 1.0)),
            0.49801566811835604,
            -0.15494982830181069,
            1e-10,
        );
    }

    #[test]
    fn digamma_known_values() {
        const EULER_GAMMA : f64 = 0.5772156649015329;
        close(digamma(Complex::new(1.0, 0.0)), -EULER_GAMMA, 0.0, 1e-10);
        // psi(1/2) = -gamma - 2 ln 2
        close(
            digamma(Complex::new(0.5, 0.0)),
            -EULER_GAMMA - 2.0 * 2.0f64.ln(),
            0.0,
            1e-10,
        );
    }

    #[test]
    fn lambertw_fixed_points() {
        // W(e) = 1 and W(1) is the omega constant
        close(lambertw(Complex::new(std::f64::consts::E, 0.0)), 1.0, 0.0, 1e-10);
        close(lambertw(Complex::new(1.0, 0.0)), 0.5671432904097838, 0.0, 1e-10);
        assert_eq!(lambertw(Complex::new(0.0, 0.0)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn lambertw_inverts_w_exp_w() {
        for &(re, im) in &[(2.0, 3.0), (-0.2, 0.1), (5.0, -1.0), (0.4, 0.0)] {
            let z = Complex::new(re, im);
            let w = lambertw(z);
            let back = w * w.exp();
            close(back, z.re, z.im, 1e-9);
        }
    }

    #[test]
    fn zeta_known_values() {
        close(zeta(Complex::new(2.0, 0.0)), PI * PI / 6.0, 0.0, 1e-12);
        close(zeta(Complex::new(3.0, 0.0)), 1.2020569031595943, 0.0, 1e-12);
        close(zeta(Complex::new(0.0, 0.0)), -0.5, 0.0, 1e-8);
        // Left half-plane via the functional equation
        close(zeta(Complex::new(-1.0, 0.0)), -1.0 / 12.0, 0.0, 1e-10);
    }

    #[test]
    fn zetac_is_zeta_minus_one() {
        close(zetac(Complex::new(2.0, 0.0)), PI * PI / 6.0 - 1.0, 0.0, 1e-12);
    }

    #[test]
    fn pole_propagates_nonfinite() {
        let at_pole = zeta(Complex::new(1.0, 0.0));
        assert!(!at_pole.re.is_finite());
    }
}
