/// Creates a [`HashSet`](std::collections::HashSet) containing the arguments, similar to
/// [`vec!`].
#[macro_export]
macro_rules! hashset {
    ($( $x: expr ),* ) => {
        {
            let mut tmp = std::collections::HashSet::new();
            $(
                tmp.insert($x);
            )*
            tmp
        }
    };
}
