macro_rules! uni {
    ($t:ty, $u:ty $(, $($b:tt)+)?) => {
        impl<T, U $(, $($b)+)?> PartialEq<$u> for $t
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &$u) -> bool {
                self[..] == other[..]
            }
        }
    };
}

macro_rules! bi {
    ($t:ty, $u:ty $(, $($b:tt)+)?) => {
        $crate::eq_impl::uni!($t, $u $(, $($b)+)?);

        impl<T, U $(, $($b)+)?> PartialEq<$t> for $u
        where
            U: PartialEq<T>,
        {
            fn eq(&self, other: &$t) -> bool {
                self[..] == other[..]
            }
        }
    };
}

macro_rules! impl_for {
    ($t:ident) => {
        $crate::eq_impl::bi!($t<T>, Vec<U>);
        $crate::eq_impl::bi!($t<T>, [U]);
        $crate::eq_impl::bi!($t<T>, &[U]);
        $crate::eq_impl::bi!($t<T>, &mut [U]);
        $crate::eq_impl::bi!($t<T>, [U; N], const N: usize);
        $crate::eq_impl::bi!($t<T>, &[U; N], const N: usize);
        $crate::eq_impl::uni!($t<T>, $t<U>);
        impl<T> Eq for $t<T> where T: Eq {}
    };
}

pub(crate) use bi;
pub(crate) use impl_for;
pub(crate) use uni;
