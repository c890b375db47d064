use std::{array, fmt};

use crate::{
    traits::{Number, Sqrt},
    MinMax, One, Trig, Zero,
};

mod ops;

/// A 1-dimensional vector.
pub type Vec1<T> = Vector<T, 1>;
/// A 1-dimensional vector with [`f32`] components.
pub type Vec1f = Vec1<f32>;
/// A 2-dimensional vector.
pub type Vec2<T> = Vector<T, 2>;
/// A 2-dimensional vector with [`f32`] components.
pub type Vec2f = Vec2<f32>;
/// A 3-dimensional vector.
pub type Vec3<T> = Vector<T, 3>;
/// A 3-dimensional vector with [`f32`] components.
pub type Vec3f = Vec3<f32>;
/// A 4-dimensional vector.
pub type Vec4<T> = Vector<T, 4>;
/// A 4-dimensional vector with [`f32`] components.
pub type Vec4f = Vec4<f32>;

/// An `N`-component column vector storing components of type `T`.
///
/// # Construction
///
/// - The freestanding [`vec2`], [`vec3`] and [`vec4`] functions directly create vectors from
///   provided values.
/// - [`Vector::splat`] creates a vector by copying the given value into each component.
/// - [`Vector::from_fn`] creates a vector by invoking a closure with the index of each component.
/// - Vectors can be created from arrays using their [`From`] implementation.
/// - [`Vector::ZERO`] is a vector containing all-zeroes, and `Vector::X`, `Vector::Y`, `Vector::Z`
///   and `Vector::W` are unit vectors for up to 4 dimensions.
///
/// # Component Access
///
/// The [`Index`]/[`IndexMut`] impls work just like on arrays, [`Vector::as_array`] and
/// [`Vector::as_slice`] (and their `mut` counterparts) expose the underlying storage, and for
/// vectors of up to 4 dimensions the [`x()`][Self::x], [`y()`][Vector::y], [`z()`][Vector::z] and
/// [`w()`][Vector::w] accessors return individual components by name.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

/// Creates a 2-dimensional vector.
#[inline]
pub fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

/// Creates a 3-dimensional vector.
#[inline]
pub fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

/// Creates a 4-dimensional vector.
#[inline]
pub fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}

impl<T: Zero + Copy, const N: usize> Vector<T, N> {
    /// A vector with each component initialized to 0.
    pub const ZERO: Self = Self([T::ZERO; N]);
}

impl<T: Zero + One> Vector<T, 2> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = Self([T::ONE, T::ZERO]);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = Self([T::ZERO, T::ONE]);
}

impl<T: Zero + One> Vector<T, 3> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO]);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO]);
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE]);
}

impl<T: Zero + One> Vector<T, 4> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO, T::ZERO]);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO, T::ZERO]);
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE, T::ZERO]);
    /// A unit vector pointing in the W direction.
    pub const W: Self = Self([T::ZERO, T::ZERO, T::ZERO, T::ONE]);
}

impl<T, const N: usize> Vector<T, N> {
    /// Creates a vector with each component initialized to `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::*;
    /// let v = Vector::splat(2);
    /// assert_eq!(v, vec3(2, 2, 2));
    /// ```
    #[inline]
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self([elem; N])
    }

    /// Creates a vector where each component is initialized by invoking a closure with its index.
    ///
    /// Analogous to [`array::from_fn`].
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(cb))
    }

    /// Applies a closure to each component, returning a new vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::*;
    /// let v = vec3(1, 2, 3).map(|i| i * 10);
    /// assert_eq!(v, vec3(10, 20, 30));
    /// ```
    pub fn map<F, U>(self, f: F) -> Vector<U, N>
    where
        F: FnMut(T) -> U,
    {
        Vector(self.0.map(f))
    }

    /// Returns a reference to the underlying components as an array of length `N`.
    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    /// Returns a mutable reference to the underlying components as an array of length `N`.
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.0
    }

    /// Returns a reference to the underlying components as a slice.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Returns a mutable reference to the underlying components as a slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    /// Converts this [`Vector`] into an `N`-component array.
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Computes the dot product of `self` and `other`.
    ///
    /// Geometrically, the dot product provides information about the relative angle of the two
    /// vectors: it is positive when the angle between them is less than 90°, zero when they are
    /// perpendicular, and negative when the angle exceeds 90°.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::*;
    /// let a = vec3(1, 3, -5);
    /// let b = vec3(4, -2, -1);
    /// assert_eq!(a.dot(b), 3);
    /// ```
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.0
            .into_iter()
            .zip(other.0)
            .fold(T::ZERO, |acc, (a, b)| acc + a * b)
    }

    /// Returns the squared length of this vector.
    pub fn length2(&self) -> T
    where
        T: Number,
    {
        self.dot(*self)
    }

    /// Returns the length of this vector.
    pub fn length(&self) -> T
    where
        T: Number + Sqrt,
    {
        self.length2().sqrt()
    }

    /// Divides this vector by its length, resulting in a unit vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::*;
    /// let z = vec3(0.0, 0.0, 4.0).normalize();
    /// assert_eq!(z, vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn normalize(self) -> Self
    where
        T: Number + Sqrt,
    {
        self / self.length()
    }

    /// Returns the component-wise minimum of `self` and `other`.
    pub fn min(self, other: Self) -> Self
    where
        T: MinMax,
    {
        let mut iter = self.0.into_iter().zip(other.0);
        Self::from_fn(|_| {
            let (a, b) = iter.next().unwrap();
            a.min(b)
        })
    }

    /// Returns the component-wise maximum of `self` and `other`.
    pub fn max(self, other: Self) -> Self
    where
        T: MinMax,
    {
        let mut iter = self.0.into_iter().zip(other.0);
        Self::from_fn(|_| {
            let (a, b) = iter.next().unwrap();
            a.max(b)
        })
    }
}

impl<T: Copy> Vector<T, 1> {
    /// Returns the vector's X component.
    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }
}

impl<T: Copy> Vector<T, 2> {
    /// Returns the vector's X component.
    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    /// Returns the vector's Y component.
    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    /// Computes the *perpendicular dot product* of `self` and `other`.
    ///
    /// This is the Z component of the cross product of the two vectors extended into 3D, and its
    /// sign indicates whether `other` points to the left or to the right of `self`.
    pub fn perp_dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.x() * other.y() - self.y() * other.x()
    }

    /// Rotates this vector clockwise in the XY plane (Y pointing down).
    pub fn rotate_clockwise(self, radians: T) -> Self
    where
        T: Number + Trig,
    {
        self.rotate_counterclockwise(-radians)
    }

    /// Rotates this vector counterclockwise in the XY plane (Y pointing down).
    pub fn rotate_counterclockwise(self, radians: T) -> Self
    where
        T: Number + Trig,
    {
        let (sin, cos) = (radians.sin(), radians.cos());
        vec2(
            self.x() * cos - self.y() * sin,
            self.x() * sin + self.y() * cos,
        )
    }
}

impl<T: Copy> Vector<T, 3> {
    /// Returns the vector's X component.
    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    /// Returns the vector's Y component.
    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    /// Returns the vector's Z component.
    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    /// Computes the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both input vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::*;
    /// assert_eq!(vec3(1, 0, 0).cross(vec3(0, 1, 0)), vec3(0, 0, 1));
    /// ```
    pub fn cross(self, other: Self) -> Self
    where
        T: Number,
    {
        vec3(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }
}

impl<T: Copy> Vector<T, 4> {
    /// Returns the vector's X component.
    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    /// Returns the vector's Y component.
    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    /// Returns the vector's Z component.
    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    /// Returns the vector's W component.
    #[inline]
    pub fn w(&self) -> T {
        self.0[3]
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(arr: [T; N]) -> Self {
        Self(arr)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(v: Vector<T, N>) -> Self {
        v.0
    }
}

impl<T: Default, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, elem) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, ")")
    }
}
