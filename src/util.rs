pub fn score(size: f32) -> i64 {
    (size / 10.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::score;

    #[test]
    fn score_rounds_to_nearest() {
        assert_eq!(score(900.0), 90);
        assert_eq!(score(905.0), 91);
        assert_eq!(score(904.0), 90);
        assert_eq!(score(10.0), 1);
    }
}
