/// 두 점 (x0, y0), (x1, y1) 사이를 선형 보간한다.
///
/// x0 == x1 이면 0 으로 나누지 않고 y0 를 그대로 돌려준다.
pub fn linear_interpolation(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    if x0 == x1 {
        return y0;
    }
    y0 + (x - x0) * ((y1 - y0) / (x1 - x0))
}
